//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier to
//! get started with the library.

pub use crate::builder::{StatementBuilder, StatementTemplate};
pub use crate::client::MysqlClient;
pub use crate::config::MysqlConfig;
pub use crate::error::MysqlMiddlewareError;
pub use crate::guard::LinkState;
pub use crate::results::{QueryOutcome, ResultSet, Row};
pub use crate::session::{SessionConnector, SqlSession};
pub use crate::types::{RowSpec, Value};
