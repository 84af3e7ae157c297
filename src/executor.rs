//! Statement execution against the guarded session.
//!
//! Statements run in order on one session with a single commit after the
//! whole list; there is no per-statement rollback, so a failure partway
//! through a multi-statement call leaves the earlier statements' work
//! pending behind that same future commit boundary. Callers needing
//! atomicity must send one statement per call.

use tracing::error;

use crate::error::MysqlMiddlewareError;
use crate::guard::ConnectionGuard;
use crate::results::QueryOutcome;

/// Case-insensitive substring check; anything mentioning SELECT is treated
/// as a query.
#[must_use]
pub(crate) fn is_select(sql: &str) -> bool {
    sql.to_uppercase().contains("SELECT")
}

/// Run `statements` in order on the live session and commit once.
///
/// The outcome follows the last statement: its fetched rows when it was a
/// SELECT, its affected-row count otherwise.
///
/// # Errors
///
/// Connectivity failures surface from the guard; engine-cataloged errors
/// are logged at minimal detail, everything else with the offending
/// statement text. All of them abort the remainder of the list.
pub(crate) async fn run_statements(
    guard: &mut ConnectionGuard,
    statements: &[String],
) -> Result<QueryOutcome, MysqlMiddlewareError> {
    let session = guard.ensure_alive().await?;

    let mut outcome = QueryOutcome::Affected(0);
    for statement in statements {
        let result = if is_select(statement) {
            session.query(statement).await.map(QueryOutcome::Rows)
        } else {
            session.execute(statement).await.map(QueryOutcome::Affected)
        };
        outcome = result.map_err(|e| classify(e, statement))?;
    }
    session.commit().await?;

    Ok(outcome)
}

/// Engine-cataloged errors keep their shape and log without the statement;
/// anything else is wrapped with the statement text.
fn classify(err: MysqlMiddlewareError, statement: &str) -> MysqlMiddlewareError {
    if err.is_server_error() {
        error!(error = %err, "sql server error");
        err
    } else {
        error!(error = %err, statement, "sql error");
        MysqlMiddlewareError::ExecutionError {
            statement: statement.to_string(),
            message: err.to_string(),
        }
    }
}
