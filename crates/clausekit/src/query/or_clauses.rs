//! Disjunctive predicate groups.

use super::{OR_JOINER, pad};
use crate::value::Value;

/// An ordered group of predicates joined with `OR`.
///
/// The rendered fragment is padded but not parenthesized. Wrap it yourself
/// before handing it to [`Query::add_where`](super::Query::add_where), or use
/// [`Query::add_or_clauses`](super::Query::add_or_clauses) which does so.
#[derive(Debug, Clone, Default)]
pub struct OrClauses {
    clauses: Vec<String>,
    args: Vec<Value>,
}

impl OrClauses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one alternative and its positional arguments.
    pub fn add_or<I>(&mut self, clause: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.clauses.push(pad(clause).into_owned());
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Render the group. Returns `("", [])` when nothing was added.
    pub fn build(&self) -> (String, Vec<Value>) {
        if self.clauses.is_empty() {
            return (String::new(), Vec::new());
        }
        let joined = self.clauses.join(OR_JOINER);
        (pad(&joined).into_owned(), self.args.clone())
    }
}
