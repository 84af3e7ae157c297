use thiserror::Error;

/// Error type shared by every fallible operation in this crate.
///
/// Each failure class is an explicit variant so callers can match on it;
/// no failure is reported through a sentinel return value.
#[derive(Debug, Error)]
pub enum MysqlMiddlewareError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A connect or probe attempt failed. Recovered internally by the
    /// connection guard's retry loop where possible.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The reconnect loop exhausted its attempt budget. The session is in
    /// the `Failed` state until a later operation re-probes it.
    #[error("connection gave up after {attempts} reconnect attempts")]
    ConnectionGaveUp { attempts: u32 },

    /// An error the database engine itself reported, with its error code.
    #[error("server error {code}: {message}")]
    ServerError { code: u16, message: String },

    /// Any other execution failure (malformed SQL, constraint violation,
    /// ...), carrying the statement that triggered it.
    #[error("SQL execution error: {message}; statement: {statement}")]
    ExecutionError { statement: String, message: String },

    #[error("Other database error: {0}")]
    Other(String),
}

#[cfg(feature = "mysql")]
impl From<mysql_async::Error> for MysqlMiddlewareError {
    fn from(err: mysql_async::Error) -> Self {
        match err {
            mysql_async::Error::Server(server) => MysqlMiddlewareError::ServerError {
                code: server.code,
                message: server.message,
            },
            mysql_async::Error::Io(io) => MysqlMiddlewareError::ConnectionError(io.to_string()),
            other => MysqlMiddlewareError::Other(other.to_string()),
        }
    }
}

impl MysqlMiddlewareError {
    /// Whether the database engine itself cataloged this error, as opposed
    /// to a driver, IO, or middleware failure.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, MysqlMiddlewareError::ServerError { .. })
    }
}
