//! Dialect-aware database handle.
//!
//! [`DbHandle`] pairs an [`Executor`] with the [`Dialect`] it speaks and
//! smooths over the differences callers would otherwise special-case:
//!
//! - placeholder syntax (`?` vs `$n`)
//! - SQLite locking (WAL journaling is switched on when the handle opens)
//! - start-of-day date arithmetic
//!
//! # Example
//!
//! ```ignore
//! use clausekit::{DbHandle, Dialect, HandleConfig, Query, args};
//!
//! let db = DbHandle::open(client, Dialect::Postgres, HandleConfig::new()).await?;
//!
//! let mut q = Query::new("SELECT id FROM invocations");
//! q.add_where(&format!("created_at > {}", db.start_of_day_timestamp(7)), args![])
//!     .add_where("user_id = ?", args![user_id])
//!     .set_limit(50);
//! let rows = db.fetch(&q).await?;
//! ```

use crate::client::Executor;
use crate::config::HandleConfig;
use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::query::{Query, placeholder};
use crate::value::Value;
use std::borrow::Cow;

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// An [`Executor`] bound to a SQL dialect.
#[derive(Debug)]
pub struct DbHandle<E> {
    executor: E,
    dialect: Dialect,
    config: HandleConfig,
}

impl<E: Executor> DbHandle<E> {
    /// Wrap an executor without running any connection setup.
    pub fn new(executor: E, dialect: Dialect, config: HandleConfig) -> Self {
        Self {
            executor,
            dialect,
            config,
        }
    }

    /// Wrap an executor and run the dialect's connection pragmas.
    pub async fn open(executor: E, dialect: Dialect, config: HandleConfig) -> QueryResult<Self> {
        let handle = Self::new(executor, dialect, config);
        if handle.config.sqlite_wal {
            for pragma in dialect.connect_pragmas() {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "clausekit.sql", %dialect, pragma, "running connect pragma");
                handle
                    .with_timeout(handle.executor.execute(pragma, &[]))
                    .await?;
            }
        }
        Ok(handle)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    /// See [`Dialect::start_of_day_timestamp`].
    pub fn start_of_day_timestamp(&self, day_offset: i64) -> String {
        self.dialect.start_of_day_timestamp(day_offset)
    }

    /// Build `query` and return all rows.
    pub async fn fetch(&self, query: &Query) -> QueryResult<Vec<E::Row>> {
        self.fetch_raw(&query.to_sql(), query.args()).await
    }

    /// Build `query` and return the affected row count.
    pub async fn execute(&self, query: &Query) -> QueryResult<u64> {
        self.execute_raw(&query.to_sql(), query.args()).await
    }

    /// Run a `?`-style statement and return all rows.
    pub async fn fetch_raw(&self, sql: &str, args: &[Value]) -> QueryResult<Vec<E::Row>> {
        let sql = self.prepare(sql, args)?;
        self.with_timeout(self.executor.query(&sql, args)).await
    }

    /// Run a `?`-style statement and return the affected row count.
    pub async fn execute_raw(&self, sql: &str, args: &[Value]) -> QueryResult<u64> {
        let sql = self.prepare(sql, args)?;
        self.with_timeout(self.executor.execute(&sql, args)).await
    }

    fn prepare<'a>(&self, sql: &'a str, args: &[Value]) -> QueryResult<Cow<'a, str>> {
        if self.config.check_placeholders {
            let placeholders = placeholder::count(sql);
            if placeholders != args.len() {
                return Err(QueryError::PlaceholderMismatch {
                    placeholders,
                    args: args.len(),
                });
            }
        }

        let bound = self.dialect.bind_placeholders(sql);

        #[cfg(feature = "tracing")]
        {
            let logged = match self.config.max_logged_sql {
                Some(max) => truncate_sql_bytes(&bound, max),
                None => bound.as_ref(),
            };
            tracing::debug!(
                target: "clausekit.sql",
                dialect = %self.dialect,
                args = args.len(),
                sql = logged,
                "executing statement"
            );
        }

        Ok(bound)
    }

    async fn with_timeout<T, F>(&self, future: F) -> QueryResult<T>
    where
        F: std::future::Future<Output = QueryResult<T>> + Send,
    {
        match self.config.query_timeout {
            Some(timeout) => {
                tokio::pin!(future);
                tokio::select! {
                    result = &mut future => result,
                    _ = tokio::time::sleep(timeout) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(target: "clausekit.sql", ?timeout, "statement timed out");
                        Err(QueryError::Timeout(timeout))
                    }
                }
            }
            None => future.await,
        }
    }
}
