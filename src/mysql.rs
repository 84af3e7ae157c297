// mysql.rs - MySQL support via mysql_async
//! MySQL session handling via the `mysql_async` driver.
//!
//! One persistent, exclusively owned connection — no pool. The connector
//! rebuilds `Opts` from the stored [`MysqlConfig`] each time, which is what
//! lets the connection guard mint replacement sessions after a network
//! failure.

use async_trait::async_trait;
use chrono::NaiveDate;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts, OptsBuilder};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::MysqlConfig;
use crate::error::MysqlMiddlewareError;
use crate::results::ResultSet;
use crate::session::{SessionConnector, SqlSession};
use crate::types::Value;

/// A live MySQL connection implementing the session capability.
pub struct MysqlSession {
    conn: Option<Conn>,
}

impl MysqlSession {
    fn conn_mut(&mut self) -> Result<&mut Conn, MysqlMiddlewareError> {
        self.conn.as_mut().ok_or_else(|| {
            MysqlMiddlewareError::ConnectionError("session is closed".to_string())
        })
    }
}

#[async_trait]
impl SqlSession for MysqlSession {
    async fn ping(&mut self) -> Result<(), MysqlMiddlewareError> {
        Ok(self.conn_mut()?.ping().await?)
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, MysqlMiddlewareError> {
        let conn = self.conn_mut()?;
        conn.query_drop(sql).await?;
        Ok(conn.affected_rows())
    }

    async fn query(&mut self, sql: &str) -> Result<ResultSet, MysqlMiddlewareError> {
        let conn = self.conn_mut()?;
        let rows: Vec<mysql_async::Row> = conn.query(sql).await?;

        let mut result_set = ResultSet::with_capacity(rows.len());
        let Some(first) = rows.first() else {
            return Ok(result_set);
        };

        let column_names: Vec<String> = first
            .columns_ref()
            .iter()
            .map(|col| col.name_str().to_string())
            .collect();
        result_set.set_column_names(Arc::new(column_names));

        for row in &rows {
            let mut values = Vec::with_capacity(row.len());
            for idx in 0..row.len() {
                values.push(match row.as_ref(idx) {
                    Some(value) => from_driver_value(value),
                    None => Value::Null,
                });
            }
            result_set.add_row_values(values);
        }

        Ok(result_set)
    }

    async fn commit(&mut self) -> Result<(), MysqlMiddlewareError> {
        Ok(self.conn_mut()?.query_drop("COMMIT").await?)
    }

    async fn close(&mut self) -> Result<(), MysqlMiddlewareError> {
        match self.conn.take() {
            Some(conn) => Ok(conn.disconnect().await?),
            None => {
                debug!("mysql session already closed");
                Ok(())
            }
        }
    }
}

/// Builds fresh [`MysqlSession`]s from one stored configuration.
pub struct MysqlConnector {
    config: MysqlConfig,
}

impl MysqlConnector {
    /// # Errors
    ///
    /// `ConfigError` when a required field is missing.
    pub fn new(config: MysqlConfig) -> Result<Self, MysqlMiddlewareError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn opts(&self) -> Opts {
        let mut init = vec![
            format!("SET NAMES {}", self.config.charset),
            // Explicit commit-per-call semantics; the executor commits once
            // after each statement list.
            "SET autocommit=0".to_string(),
        ];
        if let Some(cmd) = &self.config.init_command {
            init.push(cmd.clone());
        }

        OptsBuilder::default()
            .ip_or_hostname(self.config.host.clone())
            .tcp_port(self.config.port)
            .user(Some(self.config.user.clone()))
            .pass(Some(self.config.password.clone()))
            .db_name(self.config.database.clone())
            .wait_timeout(self.config.wait_timeout)
            .tcp_keepalive(self.config.tcp_keepalive_ms)
            .init(init)
            .into()
    }
}

#[async_trait]
impl SessionConnector for MysqlConnector {
    async fn connect(&self) -> Result<Box<dyn SqlSession>, MysqlMiddlewareError> {
        let conn = Conn::new(self.opts()).await?;
        info!(
            host = %self.config.host,
            port = self.config.port,
            database = ?self.config.database,
            "mysql session established"
        );
        Ok(Box::new(MysqlSession { conn: Some(conn) }))
    }
}

fn from_driver_value(value: &mysql_async::Value) -> Value {
    use mysql_async::Value as Db;
    match value {
        Db::NULL => Value::Null,
        Db::Int(i) => Value::Int(*i),
        Db::UInt(u) => i64::try_from(*u)
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Text(u.to_string())),
        Db::Float(f) => Value::Float(f64::from(*f)),
        Db::Double(d) => Value::Float(*d),
        Db::Bytes(bytes) => match String::from_utf8(bytes.clone()) {
            Ok(text) => Value::Text(text),
            Err(_) => Value::Bytes(bytes.clone()),
        },
        Db::Date(year, month, day, hour, minute, second, _micros) => {
            NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                    )
                })
                .map_or(Value::Null, Value::Timestamp)
        }
        Db::Time(negative, _days, hours, minutes, seconds, _micros) => Value::Text(format!(
            "{}{:02}:{:02}:{:02}",
            if *negative { "-" } else { "" },
            hours,
            minutes,
            seconds
        )),
    }
}
