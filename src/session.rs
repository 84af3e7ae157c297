//! The relational-session capability the rest of the crate is written
//! against.
//!
//! The statement engine and connection guard never touch a driver type
//! directly; they see a session as something that can be probed, can run a
//! statement, can commit, and can be closed — and a connector that can mint
//! a fresh session from the original parameters when the current one dies.

use async_trait::async_trait;

use crate::error::MysqlMiddlewareError;
use crate::results::ResultSet;

/// One live connection to a relational backend.
///
/// All methods take `&mut self`: a session is exclusively owned and used
/// sequentially, so the borrow rules encode the single-user contract.
#[async_trait]
pub trait SqlSession: Send {
    /// Liveness probe: a lightweight round trip confirming the session is
    /// responsive.
    async fn ping(&mut self) -> Result<(), MysqlMiddlewareError>;

    /// Run a mutating statement, returning the affected-row count.
    async fn execute(&mut self, sql: &str) -> Result<u64, MysqlMiddlewareError>;

    /// Run a SELECT, returning the fetched rows.
    async fn query(&mut self, sql: &str) -> Result<ResultSet, MysqlMiddlewareError>;

    /// Commit the work performed since the last commit.
    async fn commit(&mut self) -> Result<(), MysqlMiddlewareError>;

    /// Release the connection. Closing an already-closed session succeeds.
    async fn close(&mut self) -> Result<(), MysqlMiddlewareError>;
}

/// Factory for sessions, re-invokable with the original connection
/// parameters so the guard can replace a dead session.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SqlSession>, MysqlMiddlewareError>;
}
