//! # clausekit
//!
//! A small, dialect-aware SQL clause assembler.
//!
//! ## Features
//!
//! - **SQL explicit**: callers write predicates as strings with `?` markers
//! - **Fixed clause order**: WHERE, GROUP BY, ORDER BY, LIMIT, OFFSET
//! - **Positional arguments**: values travel beside the SQL, never inside it
//! - **Dialect aware**: SQLite, MySQL and PostgreSQL differences live in [`Dialect`]
//!
//! ## Example
//!
//! ```ignore
//! use clausekit::{Query, args};
//!
//! let mut q = Query::new("SELECT * FROM jobs");
//! q.add_where("status = ?", args!["done"]).set_limit(10);
//!
//! let (sql, args) = q.build();
//! assert_eq!(sql, "SELECT * FROM jobs WHERE status = ? LIMIT 10 ");
//! ```

pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod handle;
pub mod query;
pub mod value;

pub use client::Executor;
pub use config::{DataSource, HandleConfig};
pub use dialect::Dialect;
pub use error::{QueryError, QueryResult};
pub use handle::DbHandle;
pub use query::{OrClauses, Query, pad};
pub use value::Value;

/// Build a `Vec<Value>` from heterogeneous arguments.
///
/// ```ignore
/// let args = clausekit::args!["done", 10, None::<i64>];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
