/// How the API treats updates and deletes of unknown users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    /// `PUT` on an unknown id creates the user instead of returning `404`.
    pub lenient_updates: bool,
    /// `DELETE` on an unknown id returns a placeholder user instead of `404`.
    pub lenient_deletes: bool,
}

impl ApiConfig {
    /// Unknown ids are rejected with `404`.
    pub fn strict() -> Self {
        Self {
            lenient_updates: false,
            lenient_deletes: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            lenient_updates: true,
            lenient_deletes: true,
        }
    }
}
