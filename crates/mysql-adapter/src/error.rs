//! Error types for the MySQL adapter.

use mysql_async::{DriverError, Error as MySqlError};
use norm_mysql_types::CompileError;
use thiserror::Error;

/// Errors that can occur while compiling or executing an operation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The operation could not be turned into SQL.
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// The server rejected the statement.
    #[error("MySQL error: {source} (statement: {sql})")]
    Execution {
        sql: String,
        code: Option<u16>,
        source: MySqlError,
    },

    /// The connection dropped. The handle has been reset; the statement was
    /// not retried.
    #[error("Connection lost while executing: {sql}")]
    ConnectionLost { sql: String, source: MySqlError },

    /// Establishing a new connection failed.
    #[error("Failed to connect to MySQL: {0}")]
    Connect(#[source] MySqlError),

    /// Malformed connection string.
    #[error("Invalid MySQL connection URL: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// A result did not have the expected shape.
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),
}

impl AdapterError {
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::ConnectionLost { .. })
    }

    /// Engine error code, when the server reported one.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Execution { code, .. } => *code,
            _ => None,
        }
    }
}

/// Whether a driver error means the connection itself is gone.
pub fn is_connection_loss(err: &MySqlError) -> bool {
    matches!(
        err,
        MySqlError::Io(_) | MySqlError::Driver(DriverError::ConnectionClosed)
    )
}

/// Wrap a driver error with the statement that produced it.
pub fn classify(sql: &str, err: MySqlError) -> AdapterError {
    if is_connection_loss(&err) {
        return AdapterError::ConnectionLost {
            sql: sql.to_string(),
            source: err,
        };
    }
    let code = match &err {
        MySqlError::Server(server) => Some(server.code),
        _ => None,
    };
    AdapterError::Execution {
        sql: sql.to_string(),
        code,
        source: err,
    }
}
