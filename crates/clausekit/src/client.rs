//! Statement executor trait.

use crate::error::QueryResult;
use crate::value::Value;

/// Anything that can run a finished SQL string with positional arguments.
///
/// Connections, pools and transactions all fit here. The SQL handed in has
/// already been rewritten to the executor's placeholder style by
/// [`DbHandle`](crate::DbHandle).
pub trait Executor: Send + Sync {
    /// Backend row type.
    type Row: Send;

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = QueryResult<Vec<Self::Row>>> + Send;

    /// Execute a statement and return the affected row count.
    fn execute(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = QueryResult<u64>> + Send;
}

impl<E: Executor> Executor for &E {
    type Row = E::Row;

    async fn query(&self, sql: &str, args: &[Value]) -> QueryResult<Vec<Self::Row>> {
        (*self).query(sql, args).await
    }

    async fn execute(&self, sql: &str, args: &[Value]) -> QueryResult<u64> {
        (*self).execute(sql, args).await
    }
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Executor;
    use crate::error::QueryResult;
    use crate::value::Value;
    use tokio_postgres::types::ToSql;

    fn params_ref(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
        args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    impl Executor for tokio_postgres::Client {
        type Row = tokio_postgres::Row;

        async fn query(&self, sql: &str, args: &[Value]) -> QueryResult<Vec<Self::Row>> {
            let params = params_ref(args);
            Ok(tokio_postgres::Client::query(self, sql, &params).await?)
        }

        async fn execute(&self, sql: &str, args: &[Value]) -> QueryResult<u64> {
            let params = params_ref(args);
            Ok(tokio_postgres::Client::execute(self, sql, &params).await?)
        }
    }

    impl Executor for tokio_postgres::Transaction<'_> {
        type Row = tokio_postgres::Row;

        async fn query(&self, sql: &str, args: &[Value]) -> QueryResult<Vec<Self::Row>> {
            let params = params_ref(args);
            Ok(tokio_postgres::Transaction::query(self, sql, &params).await?)
        }

        async fn execute(&self, sql: &str, args: &[Value]) -> QueryResult<u64> {
            let params = params_ref(args);
            Ok(tokio_postgres::Transaction::execute(self, sql, &params).await?)
        }
    }
}
