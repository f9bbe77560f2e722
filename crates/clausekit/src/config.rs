//! Handle configuration and data source parsing.

use crate::dialect::Dialect;
use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Configuration for [`DbHandle`](crate::DbHandle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    /// Query timeout duration.
    pub query_timeout: Option<Duration>,
    /// Switch SQLite to WAL journaling when the handle opens.
    pub sqlite_wal: bool,
    /// Reject statements whose `?` count differs from the argument count
    /// before they reach the executor.
    pub check_placeholders: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql: Option<usize>,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            sqlite_wal: true,
            check_placeholders: false,
            max_logged_sql: Some(200),
        }
    }
}

impl HandleConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set query timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.query_timeout = Some(duration);
        self
    }

    /// Skip the WAL pragma on SQLite.
    pub fn no_wal(mut self) -> Self {
        self.sqlite_wal = false;
        self
    }

    /// Validate placeholder/argument counts before execution.
    pub fn check_placeholders(mut self) -> Self {
        self.check_placeholders = true;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_logged_sql(mut self, len: usize) -> Self {
        self.max_logged_sql = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql = None;
        self
    }
}

/// A resolved `<dialect>://<connection>` data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub dialect: Dialect,
    /// Everything after `://`, handed to the driver untouched.
    pub connection: String,
}

impl FromStr for DataSource {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QueryError::NotConfigured);
        }
        let (dialect, connection) = s
            .split_once("://")
            .ok_or_else(|| QueryError::InvalidDataSource(s.to_string()))?;
        Ok(Self {
            dialect: dialect.parse()?,
            connection: connection.to_string(),
        })
    }
}

impl DataSource {
    /// Connection string the driver expects.
    ///
    /// PostgreSQL drivers take the full URL; the others take the remainder.
    pub fn driver_url(&self) -> String {
        match self.dialect {
            Dialect::Postgres => format!("postgres://{}", self.connection),
            Dialect::Sqlite | Dialect::Mysql => self.connection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = HandleConfig::default();
        assert!(c.sqlite_wal);
        assert!(!c.check_placeholders);
        assert_eq!(c.query_timeout, None);
        assert_eq!(c.max_logged_sql, Some(200));
    }

    #[test]
    fn builder_methods() {
        let c = HandleConfig::new()
            .timeout(Duration::from_secs(3))
            .no_wal()
            .check_placeholders()
            .no_truncate();
        assert_eq!(c.query_timeout, Some(Duration::from_secs(3)));
        assert!(!c.sqlite_wal);
        assert!(c.check_placeholders);
        assert_eq!(c.max_logged_sql, None);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let c: HandleConfig = serde_json::from_str(r#"{"check_placeholders": true}"#).unwrap();
        assert!(c.check_placeholders);
        assert!(c.sqlite_wal);
    }

    #[test]
    fn parse_sqlite_source() {
        let ds: DataSource = "sqlite3:///tmp/app.db".parse().unwrap();
        assert_eq!(ds.dialect, Dialect::Sqlite);
        assert_eq!(ds.connection, "/tmp/app.db");
        assert_eq!(ds.driver_url(), "/tmp/app.db");
    }

    #[test]
    fn parse_postgres_source() {
        let ds: DataSource = "postgres://user:pw@localhost/app".parse().unwrap();
        assert_eq!(ds.dialect, Dialect::Postgres);
        assert_eq!(ds.connection, "user:pw@localhost/app");
        assert_eq!(ds.driver_url(), "postgres://user:pw@localhost/app");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "".parse::<DataSource>(),
            Err(QueryError::NotConfigured)
        ));
        assert!(matches!(
            "mysql:localhost".parse::<DataSource>(),
            Err(QueryError::InvalidDataSource(_))
        ));
        assert!(matches!(
            "mongodb://localhost".parse::<DataSource>(),
            Err(QueryError::UnknownDialect(_))
        ));
    }
}
