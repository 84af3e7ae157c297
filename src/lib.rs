//! Templated-statement convenience layer over a single persistent,
//! self-healing MySQL session.
//!
//! The crate has two halves:
//!
//! - a **statement engine** ([`builder`], [`batch`], [`literal`]) that turns
//!   heterogeneous call-site row shapes — named-field mappings or positional
//!   value lists — into ready-to-run SQL, inferring column names from
//!   `information_schema` when rows are positional and composing multi-row
//!   `VALUES` statements in bounded batches;
//! - a **connection guard** ([`guard`]) that probes the one owned session
//!   before every execution and replaces it across transient network
//!   failures, with a bounded retry budget and explicit escalation once the
//!   budget is spent.
//!
//! The two meet in [`MysqlClient`], which exposes the operation surface
//! (`insert`, `insert_ignore`, `replace`, `delete`, `select`, `truncate`,
//! `execute`, `close`). Everything is written against the [`session`]
//! traits, so any backend — including the in-memory one in [`test_utils`] —
//! can stand in for the `mysql_async`-backed default.

pub mod batch;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
mod executor;
pub mod guard;
pub mod literal;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod prelude;
pub mod results;
pub mod session;
pub mod test_utils;
pub mod types;

pub use client::MysqlClient;
pub use config::MysqlConfig;
pub use error::MysqlMiddlewareError;
pub use guard::{ConnectionGuard, LinkState, MAX_RECONNECT_ATTEMPTS};
pub use results::{QueryOutcome, ResultSet, Row};
pub use types::{RowSpec, Value};

#[cfg(feature = "mysql")]
pub use mysql::{MysqlConnector, MysqlSession};
