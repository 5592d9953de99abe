//! Wadsworth Core - a fluent SQL statement builder
//!
//! This crate provides the core functionality for assembling SELECT, INSERT,
//! UPDATE, and DELETE statements through chained method calls, rendering
//! them as parameterized SQL plus an ordered binding list, and executing
//! them through a pluggable database backend.
//!
//! # Examples
//! ```
//! use wadsworth_core::select;
//!
//! let query = select(("id", "name"))
//!     .distinct()
//!     .from("posts")
//!     .where_(("status", "publish"))
//!     .order_by_desc("created_at")
//!     .limit(20);
//! ```

pub mod backend;
pub mod error;
mod executor;
pub mod facade;
pub mod grammar;
pub mod operator;
pub mod query;
pub mod value;

// Re-export main types
pub use backend::{Backend, Row};
pub use error::{Error, Result};
pub use facade::SharedBuilder;
pub use grammar::{Grammar, MysqlGrammar, Statement};
pub use operator::{op, IntoOperator, Operator};
pub use query::{
    Direction, IntoAssignments, IntoColumns, IntoConditions, Join, JoinKind, JoinOn, Logical,
    Order, Predicate, Query, QueryKind,
};
pub use value::Value;

/// Create a new SELECT query over the given columns
pub fn select<C>(columns: C) -> Query
where
    C: IntoColumns,
{
    Query::new().select(columns)
}

/// Create a new SELECT query over all columns
pub fn select_all() -> Query {
    Query::new().select_all()
}

/// Create a new UPDATE query targeting the given table
pub fn update(table: &str) -> Query {
    Query::new().update(table)
}

/// Create a new INSERT query. The target table is set with
/// [`into_table`](Query::into_table).
pub fn insert() -> Query {
    Query::new().insert()
}

/// Create a new DELETE query. The target table is set with
/// [`from`](Query::from).
pub fn delete() -> Query {
    Query::new().delete()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points_seed_the_kind() {
        assert_eq!(select("id").kind(), Some(QueryKind::Select));
        assert_eq!(select_all().kind(), Some(QueryKind::Select));
        assert_eq!(update("t").kind(), Some(QueryKind::Update));
        assert_eq!(insert().kind(), Some(QueryKind::Insert));
        assert_eq!(delete().kind(), Some(QueryKind::Delete));
    }

    #[test]
    fn test_update_entry_point_sets_the_table() {
        let query = update("users");
        assert_eq!(query.table(), "users");
    }
}
