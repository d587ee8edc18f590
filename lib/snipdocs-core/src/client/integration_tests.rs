use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode as AxumStatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::docs::{
    DocumentationConfig, DocumentationError, FieldDescriptor, MemoryRecorder, ParameterDescriptor,
    Preprocessor,
};
use crate::{Documentation, FieldType};

async fn get_user(Path(user_id): Path<String>) -> Result<Json<Value>, AxumStatusCode> {
    if user_id == "unknown" {
        return Err(AxumStatusCode::NOT_FOUND);
    }
    Ok(Json(json!({ "userId": user_id, "username": "foobar" })))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

async fn echo(body: String) -> String {
    body
}

async fn start_server() -> SocketAddr {
    init_tracing();
    let app = Router::new()
        .route("/api/users/{userId}", get(get_user))
        .route("/api/echo", post(echo).patch(echo));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    addr
}

fn client(addr: SocketAddr, recorder: &MemoryRecorder) -> ApiClient {
    ApiClient::builder()
        .with_port(addr.port())
        .with_base_path("/api")
        .expect("valid base path")
        .with_documentation_config(DocumentationConfig {
            response_preprocessors: vec![Preprocessor::remove_headers([http::header::DATE])],
            ..Default::default()
        })
        .add_recorder(recorder.clone())
        .build()
        .expect("client")
}

fn get_user_documentation() -> Documentation {
    Documentation::new("getUser")
        .pretty_print()
        .path_parameters([ParameterDescriptor::new("userId", "User's identifier")])
        .response_fields([
            FieldDescriptor::new("userId", "User's identifier").with_type(FieldType::String),
            FieldDescriptor::new("username", "User's username"),
        ])
}

#[tokio::test]
async fn should_document_call() -> anyhow::Result<()> {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    let result = client
        .get(CallPath::from("/users/{userId}").add_param("userId", "42"))?
        .accept_json()
        .with_expected_status_code(http::StatusCode::OK)
        .document(get_user_documentation())
        .await?;

    result.expect_not_empty("$.userId")?;
    assert_eq!(recorder.operation_names(), vec!["getUser"]);

    let request = recorder
        .snippet("getUser", "http-request")
        .expect("http-request snippet");
    insta::assert_snapshot!(request, @r#"
    [source,http,options="nowrap"]
    ----
    GET /api/users/42 HTTP/1.1
    Accept: application/json
    Host: localhost:8080
    ----
    "#);

    let path_parameters = recorder
        .snippet("getUser", "path-parameters")
        .expect("path-parameters snippet");
    insta::assert_snapshot!(path_parameters, @r"
    .+/api/users/{userId}+
    |===
    |Parameter|Description

    |`+userId+`
    |User's identifier

    |===
    ");

    Ok(())
}

#[tokio::test]
async fn should_fail_on_unexpected_status_without_recording() {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    let error = client
        .get(CallPath::from("/users/{userId}").add_param("userId", "unknown"))
        .expect("call")
        .with_expected_status_code(http::StatusCode::OK)
        .document(get_user_documentation())
        .await
        .expect_err("not found");

    assert!(matches!(
        error,
        ApiClientError::UnexpectedStatusCode {
            status_code: 404,
            ..
        }
    ));
    assert!(recorder.recorded().is_empty());
}

#[tokio::test]
async fn should_fail_on_undocumented_field() {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    let error = client
        .get(CallPath::from("/users/{userId}").add_param("userId", "42"))
        .expect("call")
        .document(
            Documentation::new("getUser")
                .path_parameters([ParameterDescriptor::new("userId", "User's identifier")])
                .response_fields([FieldDescriptor::new("userId", "User's identifier")]),
        )
        .await
        .expect_err("username is not documented");

    assert!(matches!(
        error,
        ApiClientError::DocumentationError(DocumentationError::UndocumentedFields { .. })
    ));
}

#[tokio::test]
async fn should_fail_on_unresolved_path() {
    let recorder = MemoryRecorder::default();
    let client = ApiClient::builder()
        .add_recorder(recorder)
        .build()
        .expect("client");

    let error = client
        .get("/users/{userId}")
        .expect("call")
        .await
        .expect_err("unresolved path");

    assert!(matches!(error, ApiClientError::PathUnresolved { .. }));
}

#[tokio::test]
async fn should_not_record_when_body_expectation_fails() {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    let error = client
        .get(CallPath::from("/users/{userId}").add_param("userId", "42"))
        .expect("call")
        .expect_not_empty("$.userId")
        .expect_not_empty("$.nickname")
        .document(get_user_documentation())
        .await
        .expect_err("no nickname");

    assert!(matches!(
        error,
        ApiClientError::ExpectationFailed { ref path, .. } if path == "$.nickname"
    ));
    assert!(recorder.recorded().is_empty());
}

#[tokio::test]
async fn should_record_when_body_expectations_pass() -> anyhow::Result<()> {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    client
        .get(CallPath::from("/users/{userId}").add_param("userId", "42"))?
        .expect_not_empty("$.userId")
        .expect_not_empty("$.username")
        .document(get_user_documentation())
        .await?;

    assert_eq!(recorder.operation_names(), vec!["getUser"]);
    Ok(())
}

#[tokio::test]
async fn should_send_raw_body_with_patch() -> anyhow::Result<()> {
    let addr = start_server().await;
    let recorder = MemoryRecorder::default();
    let client = client(addr, &recorder);

    let result = client
        .patch("/echo")?
        .with_body(CallBody::text("Hello, snippets"))
        .with_expected_status(200)
        .document(Documentation::new("echo"))
        .await?;

    assert_eq!(result.as_text(), "Hello, snippets");
    let curl = recorder.snippet("echo", "curl-request").expect("curl snippet");
    assert!(curl.contains("$ curl 'http://localhost:8080/api/echo' -i -X PATCH"));
    assert!(curl.contains("-d 'Hello, snippets'"));
    Ok(())
}

#[tokio::test]
async fn should_write_snippets_before_the_call_returns() -> anyhow::Result<()> {
    let addr = start_server().await;
    let dir = tempfile::tempdir()?;
    let client = ApiClient::builder()
        .with_port(addr.port())
        .with_base_path("/api")?
        .with_snippets_dir(dir.path())
        .build()?;

    client
        .get(CallPath::from("/users/{userId}").add_param("userId", "42"))?
        .document(get_user_documentation())
        .await?;

    let response_fields = std::fs::read_to_string(
        dir.path().join("getUser").join("response-fields.adoc"),
    )?;
    assert!(response_fields.contains("|User's username"));
    Ok(())
}
