use rstest::fixture;
use tracing::info;

use users_api::ApiConfig;

mod test_app;
pub use self::test_app::*;

mod client;
pub use self::client::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub async fn app() -> TestApp {
    start(ApiConfig::default()).await
}

#[fixture]
pub async fn strict_app() -> TestApp {
    start(ApiConfig::strict()).await
}

async fn start(config: ApiConfig) -> TestApp {
    init_tracing();
    match TestApp::start(config).await {
        Ok(app) => app,
        Err(error) => {
            panic!("fail to start test app: {error:?}");
        }
    }
}
