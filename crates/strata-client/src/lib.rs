//! Blocking ClickHouse query client with columnar result materialization.
//!
//! Provides a [`Connection`] to a ClickHouse HTTP endpoint, a lazy
//! [`ResultStream`] handle per executed query, and materialization of that
//! handle into a typed [`frame::ColumnarFrame`]. The [`capability`] module
//! gates operations that depend on an optional prerequisite (a compiled-in
//! feature, a configured endpoint) so callers can skip them instead of
//! failing.
//!
//! # Example
//!
//! ```rust,ignore
//! use strata_client::{ClientConfig, Connection};
//!
//! let mut conn = Connection::open(ClientConfig::new("http://localhost:8123"))?;
//! let frame = conn.execute("select 25 as col1")?.materialize()?;
//! assert_eq!(frame.num_rows(), 1);
//! conn.close();
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
mod config;
mod connection;
mod error;
mod protocol;
mod stream;

pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ClientError, MaterializeError};
pub use stream::ResultStream;

pub use strata_frame as frame;
