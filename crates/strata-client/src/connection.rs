//! Blocking connection to a ClickHouse HTTP endpoint.

use std::future::Future;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol;
use crate::stream::ResultStream;
use strata_frame::{ColumnData, ColumnarFrame};

/// One live session against a ClickHouse HTTP endpoint.
///
/// All public operations are blocking and return only on completion or
/// failure. Internally the transport is async; each call either reuses an
/// ambient tokio runtime from a scoped worker thread or runs a throwaway
/// current-thread runtime.
///
/// A connection is exclusively owned: it takes `&mut self` for queries and
/// provides no internal locking. Independent connections may be used from
/// independent threads.
#[derive(Debug)]
pub struct Connection {
    http: reqwest::Client,
    config: ClientConfig,
    closed: bool,
}

impl Connection {
    /// Open a connection with the given (pre-validated) configuration.
    ///
    /// The endpoint is not contacted; reachability surfaces on the first
    /// query.
    ///
    /// # Errors
    ///
    /// [`ClientError::Connection`] when the HTTP client cannot be built.
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        debug!(endpoint = %config.endpoint, "opened connection");
        Ok(Self {
            http,
            config,
            closed: false,
        })
    }

    /// Execute a query and return the lazy result handle.
    ///
    /// The query is sent with `FORMAT JSONCompact` appended; any trailing
    /// semicolon is dropped to make room for it.
    ///
    /// # Errors
    ///
    /// [`ClientError::Connection`] when the session is closed or the
    /// endpoint is unreachable, [`ClientError::Query`] when the server
    /// rejects the query (the server's diagnostic is carried unmodified)
    /// or the query is empty, [`ClientError::Materialize`] when the
    /// response declares a column type this client cannot represent.
    pub fn execute(&mut self, query: &str) -> Result<ResultStream, ClientError> {
        let sql = self.prepare(query)?;
        debug!(query = %sql, "executing query");
        let body = self.request(format!("{sql} FORMAT JSONCompact"))?;
        protocol::parse_response(&body)
    }

    /// Execute a statement and discard any result (DDL, `INSERT`, ...).
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), minus materialization.
    pub fn execute_statement(&mut self, sql: &str) -> Result<(), ClientError> {
        let sql = self.prepare(sql)?;
        debug!(statement = %sql, "executing statement");
        self.request(sql).map(|_| ())
    }

    /// Execute a query and materialize the full result.
    ///
    /// Convenience for [`execute`](Self::execute) followed by
    /// [`ResultStream::materialize`].
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute) plus materialization errors.
    pub fn query_fetch(&mut self, query: &str) -> Result<ColumnarFrame, ClientError> {
        self.execute(query)?.materialize()
    }

    /// Check that the server answers queries.
    ///
    /// # Errors
    ///
    /// [`ClientError::Connection`] or [`ClientError::Query`] when it does
    /// not.
    pub fn ping(&mut self) -> Result<(), ClientError> {
        self.execute("SELECT 1").map(|_| ())
    }

    /// List the tables of the configured database (`default` when none is
    /// configured).
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn list_tables(&mut self) -> Result<Vec<String>, ClientError> {
        let database = self.config.database.as_deref().unwrap_or("default");
        let sql = format!("SELECT name FROM system.tables WHERE database = '{database}' ORDER BY name");
        let frame = self.execute(&sql)?.materialize()?;
        match frame.column("name") {
            Some(ColumnData::Text(names)) => Ok(names.clone()),
            _ => Err(ClientError::connection(
                "unexpected response shape from system.tables",
            )),
        }
    }

    /// Close the connection. Idempotent: closing an already-closed
    /// connection is a no-op.
    pub fn close(&mut self) {
        if !self.closed {
            debug!(endpoint = %self.config.endpoint, "closing connection");
            self.closed = true;
        }
    }

    /// `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn prepare(&self, query: &str) -> Result<String, ClientError> {
        if self.closed {
            return Err(ClientError::connection("connection is closed"));
        }
        let sql = query.trim().trim_end_matches(';').trim_end();
        if sql.is_empty() {
            return Err(ClientError::query("empty query"));
        }
        Ok(sql.to_string())
    }

    fn request(&self, body: String) -> Result<String, ClientError> {
        self.block_on(self.send(body))
    }

    async fn send(&self, body: String) -> Result<String, ClientError> {
        let mut request = self.http.post(&self.config.endpoint).body(body);
        if let Some(database) = &self.config.database {
            request = request.query(&[("database", database.as_str())]);
        }
        if let Some(user) = &self.config.user {
            request = request.header("X-ClickHouse-User", user);
        }
        if let Some(password) = &self.config.password {
            request = request.header("X-ClickHouse-Key", password);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::connection(format!("request failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::connection(format!("failed to read response: {e}")))?;

        if status.is_success() {
            Ok(text)
        } else {
            debug!(%status, "server rejected query");
            Err(ClientError::Query(text))
        }
    }

    fn block_on<T, F>(&self, future: F) -> Result<T, ClientError>
    where
        T: Send,
        F: Future<Output = Result<T, ClientError>> + Send,
    {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            // Blocking inside an async context would stall the runtime;
            // run the future on a scoped worker thread instead.
            std::thread::scope(|scope| scope.spawn(move || handle.block_on(future)).join())
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        } else {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| ClientError::connection(format!("failed to start runtime: {e}")))?;
            runtime.block_on(future)
        }
    }
}
