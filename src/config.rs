use serde::{Deserialize, Serialize};

/// Connection and behavior settings for a [`MysqlClient`](crate::MysqlClient).
///
/// ```rust
/// use mysql_middleware::MysqlConfig;
///
/// let config = MysqlConfig {
///     host: "127.0.0.1".into(),
///     user: "root".into(),
///     password: "root".into(),
///     database: Some("test_db".into()),
///     ..MysqlConfig::default()
/// };
/// # let _ = config;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MysqlConfig {
    /// Host where the database server is located
    pub host: String,
    /// MySQL port (default 3306)
    pub port: u16,
    /// Username to log in as
    pub user: String,
    /// Password to use
    pub password: String,
    /// Database to use; `None` to not select one
    pub database: Option<String>,
    /// Connection character set (default `utf8mb4`)
    pub charset: String,
    /// Upper bound on rows per generated bulk statement (default 10000)
    pub batch_size: usize,
    /// Extra SQL to run once when a session is established
    pub init_command: Option<String>,
    /// Session `wait_timeout` in seconds, forwarded to the driver
    pub wait_timeout: Option<usize>,
    /// TCP keepalive in milliseconds, forwarded to the driver
    pub tcp_keepalive_ms: Option<u32>,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            database: None,
            charset: "utf8mb4".to_string(),
            batch_size: 10_000,
            init_command: None,
            wait_timeout: None,
            tcp_keepalive_ms: None,
        }
    }
}

impl MysqlConfig {
    /// Validate that the fields a connection cannot do without are present.
    ///
    /// # Errors
    ///
    /// `ConfigError` naming the missing field.
    pub fn validate(&self) -> Result<(), crate::error::MysqlMiddlewareError> {
        if self.host.is_empty() {
            return Err(crate::error::MysqlMiddlewareError::ConfigError(
                "host is required".to_string(),
            ));
        }
        if self.user.is_empty() {
            return Err(crate::error::MysqlMiddlewareError::ConfigError(
                "user is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = MysqlConfig::default();
        assert_eq!(config.port, 3306);
        assert_eq!(config.charset, "utf8mb4");
        assert_eq!(config.batch_size, 10_000);
    }

    #[test]
    fn missing_host_is_rejected() {
        let config = MysqlConfig {
            user: "root".into(),
            ..MysqlConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
