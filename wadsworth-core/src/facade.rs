//! Shared-instance convenience front door
//!
//! [`SharedBuilder`] owns a grammar plus one [`Query`] slot and forwards the
//! full accumulation surface to it, so call sites that cannot thread a query
//! value through (template hooks, callbacks) can still build one statement
//! across several calls and then render or execute it.
//!
//! The slot is scoped to one logical statement: call
//! [`reset`](SharedBuilder::reset) between statements. This is an ergonomic
//! shortcut, not a concurrency primitive; a builder must stay on one thread
//! and is meant for request-scoped use.

use serde::de::DeserializeOwned;
use std::mem;

use crate::{Direction, Grammar, IntoAssignments, IntoColumns, IntoConditions, IntoOperator};
use crate::{Query, Result};

/// One grammar plus one reusable statement slot.
pub struct SharedBuilder<G> {
    grammar: G,
    query: Query,
}

impl<G: Grammar> SharedBuilder<G> {
    /// Create a builder over the given grammar with an empty statement slot.
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            query: Query::new(),
        }
    }

    /// Take the accumulated statement out, leaving an empty slot for the
    /// next one.
    pub fn reset(&mut self) -> Query {
        mem::take(&mut self.query)
    }

    /// The statement accumulated so far.
    pub fn query(&self) -> &Query {
        &self.query
    }

    fn apply(&mut self, f: impl FnOnce(Query) -> Query) -> &mut Self {
        let query = mem::take(&mut self.query);
        self.query = f(query);
        self
    }

    pub fn select<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        self.apply(|q| q.select(columns))
    }

    pub fn select_all(&mut self) -> &mut Self {
        self.apply(Query::select_all)
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.apply(Query::distinct)
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.apply(|q| q.from(table))
    }

    pub fn into_table(&mut self, table: &str) -> &mut Self {
        self.apply(|q| q.into_table(table))
    }

    pub fn update(&mut self, table: &str) -> &mut Self {
        self.apply(|q| q.update(table))
    }

    pub fn insert(&mut self) -> &mut Self {
        self.apply(Query::insert)
    }

    pub fn delete(&mut self) -> &mut Self {
        self.apply(Query::delete)
    }

    pub fn set<A: IntoAssignments>(&mut self, assignments: A) -> &mut Self {
        self.apply(|q| q.set(assignments))
    }

    pub fn values<A: IntoAssignments>(&mut self, assignments: A) -> &mut Self {
        self.apply(|q| q.values(assignments))
    }

    pub fn join<O: IntoOperator>(
        &mut self,
        table: &str,
        first: &str,
        operator: O,
        second: &str,
    ) -> &mut Self {
        self.apply(|q| q.join(table, first, operator, second))
    }

    pub fn inner_join<O: IntoOperator>(
        &mut self,
        table: &str,
        first: &str,
        operator: O,
        second: &str,
    ) -> &mut Self {
        self.apply(|q| q.inner_join(table, first, operator, second))
    }

    pub fn left_join<O: IntoOperator>(
        &mut self,
        table: &str,
        first: &str,
        operator: O,
        second: &str,
    ) -> &mut Self {
        self.apply(|q| q.left_join(table, first, operator, second))
    }

    pub fn right_join<O: IntoOperator>(
        &mut self,
        table: &str,
        first: &str,
        operator: O,
        second: &str,
    ) -> &mut Self {
        self.apply(|q| q.right_join(table, first, operator, second))
    }

    pub fn cross_join(&mut self, table: &str) -> &mut Self {
        self.apply(|q| q.cross_join(table))
    }

    pub fn natural_join(&mut self, table: &str) -> &mut Self {
        self.apply(|q| q.natural_join(table))
    }

    pub fn where_<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.where_(conditions))
    }

    pub fn and_where<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.and_where(conditions))
    }

    pub fn or_where<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.or_where(conditions))
    }

    pub fn having<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.having(conditions))
    }

    pub fn and_having<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.and_having(conditions))
    }

    pub fn or_having<C: IntoConditions>(&mut self, conditions: C) -> &mut Self {
        self.apply(|q| q.or_having(conditions))
    }

    pub fn group_by(&mut self, column: &str) -> &mut Self {
        self.apply(|q| q.group_by(column))
    }

    pub fn order_by(&mut self, column: &str, direction: Direction) -> &mut Self {
        self.apply(|q| q.order_by(column, direction))
    }

    pub fn order_by_asc(&mut self, column: &str) -> &mut Self {
        self.apply(|q| q.order_by_asc(column))
    }

    pub fn order_by_desc(&mut self, column: &str) -> &mut Self {
        self.apply(|q| q.order_by_desc(column))
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.apply(|q| q.limit(limit))
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.apply(|q| q.offset(offset))
    }

    /// Render the accumulated statement. See [`Query::to_sql`].
    pub fn to_sql(&self) -> Result<String> {
        self.query.to_sql(&self.grammar)
    }

    /// Execute the accumulated statement and decode its rows. See
    /// [`Query::get`].
    pub fn get<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.query.get(&self.grammar)
    }

    /// Execute the accumulated statement as a write. See [`Query::execute`].
    pub fn execute(&self) -> Result<u64> {
        self.query.execute(&self.grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{row, MockBackend};
    use crate::{Error, MysqlGrammar, QueryKind};
    use serde_json::json;

    fn builder() -> SharedBuilder<MysqlGrammar<MockBackend>> {
        SharedBuilder::new(MysqlGrammar::new(MockBackend::new()))
    }

    #[test]
    fn test_calls_accumulate_on_one_statement() {
        let mut builder = builder();
        builder
            .select(("id", "name"))
            .from("users")
            .where_(("age", ">", 18))
            .order_by_desc("id")
            .limit(3);
        assert_eq!(
            builder.to_sql().unwrap(),
            "SELECT id, name FROM users WHERE age > 18 ORDER BY id DESC LIMIT 3"
        );
    }

    #[test]
    fn test_calls_split_across_statements_still_accumulate() {
        let mut builder = builder();
        builder.select_all();
        builder.from("users");
        builder.where_(("id", 1));
        assert_eq!(
            builder.to_sql().unwrap(),
            "SELECT * FROM users WHERE id = 1"
        );
    }

    #[test]
    fn test_reset_takes_the_statement_and_empties_the_slot() {
        let mut builder = builder();
        builder.update("users").set(("a", 1));

        let taken = builder.reset();
        assert_eq!(taken.kind(), Some(QueryKind::Update));

        assert_eq!(builder.query().kind(), None);
        assert!(matches!(
            builder.to_sql(),
            Err(Error::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_get_decodes_through_the_owned_grammar() {
        let backend = MockBackend::with_rows(vec![row(json!({"id": 1}))]);
        let mut builder = SharedBuilder::new(MysqlGrammar::new(backend));
        builder.select_all().from("users");

        let rows: Vec<crate::Row> = builder.get().unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_execute_forwards_affected_count() {
        let mut builder = SharedBuilder::new(MysqlGrammar::new(MockBackend::with_affected(2)));
        builder.delete().from("users").where_(("id", 1));
        assert_eq!(builder.execute().unwrap(), 2);
    }
}
