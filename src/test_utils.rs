//! Helper utilities for testing and development.
//!
//! A scriptable in-memory session and connector: tests point a
//! [`MysqlClient`](crate::MysqlClient) at a [`ScriptedConnector`] and then
//! inspect the statements, commits, and reconnects the client produced, or
//! preload result sets for SELECTs to return.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::MysqlMiddlewareError;
use crate::results::ResultSet;
use crate::session::{SessionConnector, SqlSession};
use crate::types::Value;

/// Shared observable state behind a scripted session.
#[derive(Default)]
pub struct ScriptState {
    /// Every statement the session received, in order
    pub statements: Vec<String>,
    /// Number of commits issued
    pub commits: usize,
    /// Number of closes issued
    pub closes: usize,
    /// Number of connect attempts the connector served
    pub connects: usize,
    /// Number of pings served
    pub pings: usize,
    /// Fail this many upcoming pings before answering again
    pub fail_next_pings: u32,
    /// Fail this many upcoming connects (`u32::MAX` to always fail)
    pub fail_connects: u32,
    /// Result sets handed out to queries, front first; empty set otherwise
    pub query_results: VecDeque<ResultSet>,
    /// Error returned by the next execute, taken once
    pub next_execute_error: Option<MysqlMiddlewareError>,
    /// Affected-row count reported by executes
    pub affected: u64,
}

type SharedState = Arc<Mutex<ScriptState>>;

fn lock(state: &SharedState) -> std::sync::MutexGuard<'_, ScriptState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Session whose behavior is driven by a [`ScriptState`].
pub struct ScriptedSession {
    state: SharedState,
}

#[async_trait]
impl SqlSession for ScriptedSession {
    async fn ping(&mut self) -> Result<(), MysqlMiddlewareError> {
        let mut state = lock(&self.state);
        state.pings += 1;
        if state.fail_next_pings > 0 {
            state.fail_next_pings -= 1;
            return Err(MysqlMiddlewareError::ConnectionError(
                "scripted ping failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, MysqlMiddlewareError> {
        let mut state = lock(&self.state);
        state.statements.push(sql.to_string());
        if let Some(err) = state.next_execute_error.take() {
            return Err(err);
        }
        Ok(state.affected)
    }

    async fn query(&mut self, sql: &str) -> Result<ResultSet, MysqlMiddlewareError> {
        let mut state = lock(&self.state);
        state.statements.push(sql.to_string());
        Ok(state.query_results.pop_front().unwrap_or_default())
    }

    async fn commit(&mut self) -> Result<(), MysqlMiddlewareError> {
        lock(&self.state).commits += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), MysqlMiddlewareError> {
        lock(&self.state).closes += 1;
        Ok(())
    }
}

/// Connector serving [`ScriptedSession`]s over one shared [`ScriptState`].
pub struct ScriptedConnector {
    state: SharedState,
}

impl ScriptedConnector {
    #[must_use]
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl SessionConnector for ScriptedConnector {
    async fn connect(&self) -> Result<Box<dyn SqlSession>, MysqlMiddlewareError> {
        let mut state = lock(&self.state);
        state.connects += 1;
        if state.fail_connects > 0 {
            if state.fail_connects != u32::MAX {
                state.fail_connects -= 1;
            }
            return Err(MysqlMiddlewareError::ConnectionError(
                "scripted connect failure".to_string(),
            ));
        }
        Ok(Box::new(ScriptedSession {
            state: self.state.clone(),
        }))
    }
}

/// Fresh shared state plus a connector over it.
#[must_use]
pub fn scripted() -> (SharedState, ScriptedConnector) {
    let state: SharedState = Arc::default();
    let connector = ScriptedConnector::new(state.clone());
    (state, connector)
}

/// Build a result set from column names and rows of values.
#[must_use]
pub fn make_result_set(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(
        columns.iter().map(ToString::to_string).collect(),
    ));
    for row in rows {
        result_set.add_row_values(row);
    }
    result_set
}
