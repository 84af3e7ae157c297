//! The public operation surface: templated insert/replace/delete/select/
//! truncate plus raw-template execution, over one guarded session.

use tracing::debug;

use crate::builder::{StatementBuilder, StatementTemplate, render_raw_template};
use crate::error::MysqlMiddlewareError;
use crate::executor::run_statements;
use crate::guard::{ConnectionGuard, LinkState};
use crate::results::{QueryOutcome, ResultSet};
use crate::session::SessionConnector;
use crate::types::RowSpec;

#[cfg(feature = "mysql")]
use crate::config::MysqlConfig;
#[cfg(feature = "mysql")]
use crate::mysql::MysqlConnector;

/// A templated-statement client over a single persistent session.
///
/// All operations take `&mut self`; the session is exclusively owned and
/// used sequentially. Every call commits once after its statements run —
/// there is no per-statement rollback within a call.
///
/// ```rust,no_run
/// use mysql_middleware::prelude::*;
///
/// # async fn demo() -> Result<(), MysqlMiddlewareError> {
/// let config = MysqlConfig {
///     host: "127.0.0.1".into(),
///     user: "root".into(),
///     password: "root".into(),
///     database: Some("test_db".into()),
///     ..MysqlConfig::default()
/// };
/// let mut client = MysqlClient::connect(config).await?;
/// client
///     .insert("t", &[RowSpec::fields([("id", 1), ("len", 20)])])
///     .await?;
/// let rows = client.select("t", &[RowSpec::fields([("id", 1)])]).await?;
/// assert_eq!(rows.len(), 1);
/// client.close().await?;
/// # Ok(()) }
/// ```
pub struct MysqlClient {
    guard: ConnectionGuard,
    batch_size: usize,
}

impl MysqlClient {
    /// Open a session against a MySQL server described by `config`.
    ///
    /// # Errors
    ///
    /// `ConfigError` for missing fields, `ConnectionError` when the initial
    /// connect fails.
    #[cfg(feature = "mysql")]
    pub async fn connect(config: MysqlConfig) -> Result<Self, MysqlMiddlewareError> {
        let batch_size = config.batch_size;
        let connector = MysqlConnector::new(config)?;
        Self::with_connector(Box::new(connector), batch_size).await
    }

    /// Open a session through any connector. This is how non-MySQL session
    /// implementations (including the in-memory one used by this crate's
    /// tests) plug in.
    ///
    /// # Errors
    ///
    /// Fails when the initial connect fails.
    pub async fn with_connector(
        connector: Box<dyn SessionConnector>,
        batch_size: usize,
    ) -> Result<Self, MysqlMiddlewareError> {
        let mut guard = ConnectionGuard::new(connector);
        guard.ensure_alive().await?;
        Ok(Self { guard, batch_size })
    }

    /// Lifecycle state of the underlying session.
    #[must_use]
    pub fn link_state(&self) -> LinkState {
        self.guard.state()
    }

    /// Insert `rows` into `table`, returning the affected-row count of the
    /// last statement.
    pub async fn insert(
        &mut self,
        table: &str,
        rows: &[RowSpec],
    ) -> Result<u64, MysqlMiddlewareError> {
        let outcome = self
            .run_templated(table, &StatementTemplate::insert(table), rows)
            .await?;
        Ok(affected(outcome))
    }

    /// Insert `rows`, ignoring duplicate-key conflicts.
    pub async fn insert_ignore(
        &mut self,
        table: &str,
        rows: &[RowSpec],
    ) -> Result<u64, MysqlMiddlewareError> {
        let outcome = self
            .run_templated(table, &StatementTemplate::insert_ignore(table), rows)
            .await?;
        Ok(affected(outcome))
    }

    /// Replace `rows` into `table` (`REPLACE INTO` semantics).
    pub async fn replace(
        &mut self,
        table: &str,
        rows: &[RowSpec],
    ) -> Result<u64, MysqlMiddlewareError> {
        let outcome = self
            .run_templated(table, &StatementTemplate::replace(table), rows)
            .await?;
        Ok(affected(outcome))
    }

    /// Delete rows matching the equality `predicate`.
    pub async fn delete(
        &mut self,
        table: &str,
        predicate: &[RowSpec],
    ) -> Result<u64, MysqlMiddlewareError> {
        let outcome = self
            .run_templated(table, &StatementTemplate::delete(table), predicate)
            .await?;
        Ok(affected(outcome))
    }

    /// Select rows, optionally filtered by an equality `predicate`. With an
    /// empty predicate every row comes back. Only the first predicate row
    /// is used.
    pub async fn select(
        &mut self,
        table: &str,
        predicate: &[RowSpec],
    ) -> Result<ResultSet, MysqlMiddlewareError> {
        let statements = if predicate.is_empty() {
            vec![format!("SELECT * FROM {table}")]
        } else {
            let columns = self.columns_for(table, predicate).await?;
            let builder = StatementBuilder::new(&columns, self.batch_size);
            let mut statements =
                builder.build(&StatementTemplate::select_filtered(table), predicate)?;
            statements.truncate(1);
            statements
        };
        let outcome = run_statements(&mut self.guard, &statements).await?;
        Ok(outcome.into_rows().unwrap_or_default())
    }

    /// Remove every row from `table`.
    pub async fn truncate(&mut self, table: &str) -> Result<u64, MysqlMiddlewareError> {
        let statements = vec![format!("TRUNCATE TABLE {table}")];
        let outcome = run_statements(&mut self.guard, &statements).await?;
        Ok(affected(outcome))
    }

    /// Run a raw template: `{name}` placeholders fill from named-field rows,
    /// bare `{}` placeholders fill left-to-right from positional rows, one
    /// statement per row. Substituted values take their SQL literal form.
    pub async fn execute(
        &mut self,
        template: &str,
        rows: &[RowSpec],
    ) -> Result<QueryOutcome, MysqlMiddlewareError> {
        let statements = render_raw_template(template, rows);
        run_statements(&mut self.guard, &statements).await
    }

    /// Release the session. Safe to call more than once.
    pub async fn close(&mut self) -> Result<(), MysqlMiddlewareError> {
        self.guard.close().await
    }

    async fn run_templated(
        &mut self,
        table: &str,
        template: &StatementTemplate,
        rows: &[RowSpec],
    ) -> Result<QueryOutcome, MysqlMiddlewareError> {
        let columns = self.columns_for(table, rows).await?;
        let builder = StatementBuilder::new(&columns, self.batch_size);
        let statements = builder.build(template, rows)?;
        run_statements(&mut self.guard, &statements).await
    }

    /// Introspect the table's ordered column list, but only when a
    /// positional row makes it necessary.
    async fn columns_for(
        &mut self,
        table: &str,
        rows: &[RowSpec],
    ) -> Result<Vec<String>, MysqlMiddlewareError> {
        if !rows.iter().any(RowSpec::is_positional) {
            return Ok(Vec::new());
        }

        let statement = format!(
            "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
             WHERE table_name = '{table}' ORDER BY ORDINAL_POSITION"
        );
        let outcome = run_statements(&mut self.guard, &[statement]).await?;
        let rows = outcome.into_rows().unwrap_or_default();
        let columns: Vec<String> = rows
            .results
            .iter()
            .filter_map(|row| {
                row.get("COLUMN_NAME")
                    .and_then(|value| value.as_text())
                    .map(ToString::to_string)
            })
            .collect();
        debug!(table, count = columns.len(), "introspected table columns");
        Ok(columns)
    }
}

fn affected(outcome: QueryOutcome) -> u64 {
    match outcome {
        QueryOutcome::Affected(n) => n,
        QueryOutcome::Rows(rs) => rs.rows_affected,
    }
}
