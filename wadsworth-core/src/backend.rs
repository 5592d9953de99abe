//! Database backend interface
//!
//! The backend is the sole injection-safety boundary: grammars hand it
//! placeholder-form SQL plus an ordered binding list, and it replaces each
//! placeholder with a correctly escaped literal. The core never escapes or
//! quotes values itself.

use crate::{Result, Value};

/// A result row, as loosely typed column/value pairs. Callers decode rows
/// into their own shapes further up the stack.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Trait for database backends
pub trait Backend {
    /// Replace positional placeholders with escaped literal values, in order.
    /// Returns `None` when substitution fails; callers treat that as a
    /// rendering failure.
    fn substitute(&self, sql: &str, bindings: &[Value]) -> Option<String>;

    /// Run a read statement and return its rows.
    fn query(&self, sql: &str) -> Result<Vec<Row>>;

    /// Run a write statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> Result<u64>;
}
