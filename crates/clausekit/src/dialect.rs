//! SQL dialects and the few places they differ.

use crate::error::QueryError;
use crate::query::placeholder;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The backend a statement will run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    Sqlite,
    Mysql,
    Postgres,
}

impl Dialect {
    /// Canonical lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }

    /// SQL expression for the Unix timestamp of midnight `day_offset` days ago.
    ///
    /// `day_offset` is written into the SQL as an integer literal.
    pub fn start_of_day_timestamp(&self, day_offset: i64) -> String {
        match self {
            Dialect::Sqlite => format!(
                "strftime('%s', date('now', 'start of day', '{:+} day'))",
                -day_offset
            ),
            Dialect::Mysql => format!("UNIX_TIMESTAMP(CURDATE() - INTERVAL {day_offset} DAY)"),
            Dialect::Postgres => format!(
                "CAST(EXTRACT(EPOCH FROM CURRENT_DATE - INTERVAL '{day_offset} day') AS BIGINT)"
            ),
        }
    }

    /// Rewrite `?` placeholders into the dialect's native form.
    pub fn bind_placeholders<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self {
            Dialect::Sqlite | Dialect::Mysql => Cow::Borrowed(sql),
            Dialect::Postgres => placeholder::number(sql),
        }
    }

    /// Statements to run once after connecting.
    ///
    /// SQLite gets write-ahead logging so readers do not hit "database is locked".
    pub fn connect_pragmas(&self) -> &'static [&'static str] {
        match self {
            Dialect::Sqlite => &["PRAGMA journal_mode=WAL;"],
            Dialect::Mysql | Dialect::Postgres => &[],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mysql" => Ok(Dialect::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            _ => Err(QueryError::UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dialect> for String {
    fn from(d: Dialect) -> Self {
        d.as_str().to_string()
    }
}
