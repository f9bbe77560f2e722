//! Clause accumulator for SELECT-style statements.
//!
//! [`Query`] collects WHERE predicates, GROUP BY, ORDER BY, LIMIT and OFFSET
//! and renders them onto a caller-supplied base statement in a fixed order:
//!
//! ```text
//! <base> WHERE <p1> AND <p2> ... GROUP BY <f> ORDER BY <f> ASC|DESC LIMIT <n> OFFSET <n>
//! ```
//!
//! The builder never generates placeholders. Fragments carry their own `?`
//! markers and the matching values travel alongside in append order.
//!
//! # Example
//!
//! ```ignore
//! use clausekit::{OrClauses, Query, args};
//!
//! let mut owners = OrClauses::new();
//! owners.add_or("user_id = ?", args!["u1"]).add_or("group_id = ?", args!["g1"]);
//!
//! let mut q = Query::new("SELECT * FROM invocations");
//! q.add_where("created_at_usec > ?", args![1_000_000])
//!     .add_or_clauses(&owners)
//!     .set_order_by("created_at_usec", false)
//!     .set_limit(20);
//!
//! let (sql, args) = q.build();
//! ```

mod or_clauses;
pub mod placeholder;

pub use or_clauses::OrClauses;

use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use std::borrow::Cow;

const WHERE_KEYWORD: &str = "WHERE";
const GROUP_BY_PHRASE: &str = "GROUP BY";
const ORDER_BY_PHRASE: &str = "ORDER BY";
const LIMIT_KEYWORD: &str = "LIMIT";
const OFFSET_KEYWORD: &str = "OFFSET";
pub(crate) const AND_JOINER: &str = "AND";
pub(crate) const OR_JOINER: &str = "OR";

/// Ensure `clause` starts and ends with a single space.
///
/// Only the first and last characters are inspected, so interior whitespace is
/// left alone and an already padded clause comes back unchanged.
pub fn pad(clause: &str) -> Cow<'_, str> {
    if clause.is_empty() {
        return Cow::Borrowed(" ");
    }
    let lead = !clause.starts_with(' ');
    let trail = !clause.ends_with(' ');
    match (lead, trail) {
        (false, false) => Cow::Borrowed(clause),
        _ => {
            let mut padded = String::with_capacity(clause.len() + 2);
            if lead {
                padded.push(' ');
            }
            padded.push_str(clause);
            if trail {
                padded.push(' ');
            }
            Cow::Owned(padded)
        }
    }
}

/// Append `piece` padded, letting it share the separating space with `sql`.
fn push_padded(sql: &mut String, piece: &str) {
    let padded = pad(piece);
    if sql.ends_with(' ') {
        sql.push_str(&padded[1..]);
    } else {
        sql.push_str(&padded);
    }
}

/// An ordered, append-only SQL clause accumulator.
#[derive(Debug, Clone, Default)]
pub struct Query {
    base: String,
    where_clauses: Vec<String>,
    args: Vec<Value>,
    group_by: String,
    order_by: String,
    ascending: bool,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Query {
    /// Start a query from a base statement such as `SELECT * FROM t`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Append one predicate and its positional arguments.
    ///
    /// Predicates are AND-joined in call order. The number of `args` is not
    /// checked against the `?` markers in `clause`; see [`Query::validate`].
    pub fn add_where<I>(&mut self, clause: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.where_clauses.push(pad(clause).into_owned());
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a disjunctive group as one parenthesized predicate.
    ///
    /// An empty group adds nothing.
    pub fn add_or_clauses(&mut self, group: &OrClauses) -> &mut Self {
        if group.is_empty() {
            return self;
        }
        let (clause, args) = group.build();
        self.add_where(&format!("({})", clause.trim()), args)
    }

    /// Set the GROUP BY field. An empty string leaves it unset.
    pub fn set_group_by(&mut self, field: impl Into<String>) -> &mut Self {
        self.group_by = field.into();
        self
    }

    /// Set the ORDER BY field and direction. An empty field leaves it unset.
    pub fn set_order_by(&mut self, field: impl Into<String>, ascending: bool) -> &mut Self {
        self.order_by = field.into();
        self.ascending = ascending;
        self
    }

    /// Set LIMIT. Negative values are rendered as given.
    pub fn set_limit(&mut self, limit: i64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Set OFFSET. Negative values are rendered as given.
    pub fn set_offset(&mut self, offset: i64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Arguments accumulated so far, in append order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Number of WHERE predicates.
    pub fn where_count(&self) -> usize {
        self.where_clauses.len()
    }

    /// Render the statement and return it with a copy of the arguments.
    pub fn build(&self) -> (String, Vec<Value>) {
        (self.to_sql(), self.args.clone())
    }

    /// Render the statement and consume the builder.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        let sql = self.to_sql();
        (sql, self.args)
    }

    /// Render only the SQL string.
    ///
    /// A piece drops its leading space when the SQL built so far already ends
    /// in a space, so a base ending in a space is not padded a second time.
    pub fn to_sql(&self) -> String {
        let mut sql = self.base.clone();

        if !self.where_clauses.is_empty() {
            push_padded(&mut sql, WHERE_KEYWORD);
            push_padded(&mut sql, &self.where_clauses.join(AND_JOINER));
        }
        if !self.group_by.is_empty() {
            push_padded(&mut sql, GROUP_BY_PHRASE);
            push_padded(&mut sql, &self.group_by);
        }
        if !self.order_by.is_empty() {
            push_padded(&mut sql, ORDER_BY_PHRASE);
            push_padded(&mut sql, &self.order_by);
            push_padded(&mut sql, if self.ascending { "ASC" } else { "DESC" });
        }
        if let Some(limit) = self.limit {
            push_padded(&mut sql, LIMIT_KEYWORD);
            push_padded(&mut sql, &limit.to_string());
        }
        if let Some(offset) = self.offset {
            push_padded(&mut sql, OFFSET_KEYWORD);
            push_padded(&mut sql, &offset.to_string());
        }
        sql
    }

    /// Count `?` markers in the rendered statement, ignoring literals, quoted identifiers, comments and dollar-quoted bodies.
    pub fn count_placeholders(&self) -> usize {
        placeholder::count(&self.to_sql())
    }

    /// Check that the placeholder count matches the argument count.
    ///
    /// [`Query::build`] never calls this; it is opt-in for callers (and for
    /// [`DbHandle`](crate::DbHandle) when `check_placeholders` is enabled).
    pub fn validate(&self) -> QueryResult<()> {
        let placeholders = self.count_placeholders();
        if placeholders != self.args.len() {
            return Err(QueryError::PlaceholderMismatch {
                placeholders,
                args: self.args.len(),
            });
        }
        Ok(())
    }
}
