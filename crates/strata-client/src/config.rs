//! Client configuration.
//!
//! Configuration is treated as already validated: the endpoint is an
//! opaque URL string supplied by the embedding application. The client
//! neither parses nor validates it beyond handing it to the transport.

/// Connection parameters for one ClickHouse HTTP endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP endpoint URL, e.g. `http://localhost:8123`.
    pub endpoint: String,
    /// Database to run queries against (`None` = server default).
    pub database: Option<String>,
    /// User name (`None` = server default user).
    pub user: Option<String>,
    /// Password for `user`.
    pub password: Option<String>,
}

impl ClientConfig {
    /// Configuration for `endpoint` with all optional parameters unset.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            database: None,
            user: None,
            password: None,
        }
    }

    /// Set the database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the user name.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}
