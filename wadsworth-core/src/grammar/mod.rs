//! Statement rendering and execution dispatch
//!
//! A [`Grammar`] reads a [`Query`] and turns it into placeholder-form SQL
//! plus a parallel binding list, then hands both to its [`Backend`] for
//! substitution and execution. One implementation exists per dialect; kinds
//! a dialect does not implement surface [`Error::UnsupportedQueryType`].

pub mod mysql;

pub use mysql::MysqlGrammar;

use crate::{Backend, Error, Query, QueryKind, Result, Row, Value};

/// A rendered statement: placeholder-form SQL and the bindings that fill it,
/// in placeholder order. Both sides come from a single traversal of each
/// clause list, so their orders cannot diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub bindings: Vec<Value>,
}

/// Per-dialect translator from query state to executable SQL.
pub trait Grammar {
    type Backend: Backend;

    /// The backend this grammar substitutes and executes through.
    fn backend(&self) -> &Self::Backend;

    /// Render a SELECT. Dialects that do not support the kind keep the
    /// default, which reports it as unsupported.
    fn select_statement(&self, query: &Query) -> Result<Statement> {
        let _ = query;
        Err(Error::UnsupportedQueryType)
    }

    /// Render an INSERT.
    fn insert_statement(&self, query: &Query) -> Result<Statement> {
        let _ = query;
        Err(Error::UnsupportedQueryType)
    }

    /// Render an UPDATE.
    fn update_statement(&self, query: &Query) -> Result<Statement> {
        let _ = query;
        Err(Error::UnsupportedQueryType)
    }

    /// Render a DELETE.
    fn delete_statement(&self, query: &Query) -> Result<Statement> {
        let _ = query;
        Err(Error::UnsupportedQueryType)
    }

    /// Render the query along the path its kind selects.
    fn statement(&self, query: &Query) -> Result<Statement> {
        match query.kind() {
            Some(QueryKind::Select) => self.select_statement(query),
            Some(QueryKind::Insert) => self.insert_statement(query),
            Some(QueryKind::Update) => self.update_statement(query),
            Some(QueryKind::Delete) => self.delete_statement(query),
            None => Err(Error::NoQuery),
        }
    }

    /// Render the query and substitute its bindings through the backend.
    /// An empty substitution result is a rendering failure, not an
    /// execution failure.
    fn sql(&self, query: &Query) -> Result<String> {
        let statement = self.statement(query)?;
        self.backend()
            .substitute(&statement.sql, &statement.bindings)
            .ok_or(Error::NoQuery)
    }

    /// Execute a read and return its rows. Zero rows and an unrenderable
    /// query both collapse into [`Error::NoResults`];
    /// [`Error::UnsupportedQueryType`] propagates.
    fn fetch(&self, query: &Query) -> Result<Vec<Row>> {
        let sql = match self.sql(query) {
            Ok(sql) => sql,
            Err(Error::NoQuery) => return Err(Error::NoResults),
            Err(e) => return Err(e),
        };

        tracing::debug!(%sql, "fetching rows");
        let rows = self.backend().query(&sql)?;

        if rows.is_empty() {
            return Err(Error::NoResults);
        }

        Ok(rows)
    }

    /// Execute a write and return the affected-row count. Rendering failures
    /// are reported as zero affected rows; backend failures propagate.
    fn execute(&self, query: &Query) -> Result<u64> {
        let sql = match self.sql(query) {
            Ok(sql) => sql,
            Err(e) if e.is_render_failure() => return Ok(0),
            Err(e) => return Err(e),
        };

        tracing::debug!(%sql, "executing statement");
        self.backend().execute(&sql)
    }
}
