//! Builder-level execution surface
//!
//! These methods pair a [`Query`] with a [`Grammar`] and narrow the
//! grammar's typed failures into the outcomes callers actually branch on:
//! a single invalid-query failure from [`to_sql`](Query::to_sql), an empty
//! list from [`get`](Query::get), and an affected-row count from
//! [`execute`](Query::execute).

use serde::de::DeserializeOwned;

use crate::{Error, Grammar, Query, Result};

impl Query {
    /// Render the query to a fully substituted SQL string.
    ///
    /// An unset statement kind and a kind the grammar does not implement
    /// both surface as [`Error::InvalidQuery`]; this never silently returns
    /// an empty string.
    pub fn to_sql<G>(&self, grammar: &G) -> Result<String>
    where
        G: Grammar,
    {
        match grammar.sql(self) {
            Ok(sql) => Ok(sql),
            Err(Error::NoQuery) | Err(Error::UnsupportedQueryType) => {
                Err(Error::invalid_query("query cannot be rendered"))
            }
            Err(e) => Err(e),
        }
    }

    /// Execute the query and decode each row into `T`.
    ///
    /// Finding no rows is not a failure at this level: it returns an empty
    /// list, as does a kind the grammar does not implement. Backend and
    /// decoding failures still propagate.
    pub fn get<T, G>(&self, grammar: &G) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        G: Grammar,
    {
        let rows = match grammar.fetch(self) {
            Ok(rows) => rows,
            Err(Error::NoResults) | Err(Error::UnsupportedQueryType) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut decoded = Vec::with_capacity(rows.len());
        for row in rows {
            decoded.push(serde_json::from_value(serde_json::Value::Object(row))?);
        }
        Ok(decoded)
    }

    /// Execute the query as a write and return the affected-row count.
    /// Rendering failures are reported as zero affected rows.
    pub fn execute<G>(&self, grammar: &G) -> Result<u64>
    where
        G: Grammar,
    {
        grammar.execute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{row, MockBackend};
    use crate::{MysqlGrammar, Query};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Post {
        id: i64,
        title: String,
    }

    #[test]
    fn test_to_sql_renders_substituted_sql() {
        let grammar = MysqlGrammar::new(MockBackend::new());
        let query = Query::new()
            .select(("id", "title"))
            .from("posts")
            .where_(("status", "publish"));
        assert_eq!(
            query.to_sql(&grammar).unwrap(),
            "SELECT id, title FROM posts WHERE status = 'publish'"
        );
    }

    #[test]
    fn test_to_sql_narrows_no_query_to_invalid_query() {
        let grammar = MysqlGrammar::new(MockBackend::new());
        let query = Query::new().from("posts");
        assert!(matches!(
            query.to_sql(&grammar),
            Err(Error::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_get_decodes_rows() {
        let backend = MockBackend::with_rows(vec![
            row(json!({"id": 1, "title": "first"})),
            row(json!({"id": 2, "title": "second"})),
        ]);
        let grammar = MysqlGrammar::new(backend);

        let query = Query::new().select_all().from("posts");
        let posts: Vec<Post> = query.get(&grammar).unwrap();
        assert_eq!(
            posts,
            [
                Post {
                    id: 1,
                    title: "first".to_string(),
                },
                Post {
                    id: 2,
                    title: "second".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_get_with_zero_rows_yields_empty_list() {
        let grammar = MysqlGrammar::new(MockBackend::new());
        let query = Query::new().select_all().from("posts");
        let posts: Vec<Post> = query.get(&grammar).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_get_with_unrenderable_query_yields_empty_list() {
        let grammar = MysqlGrammar::new(MockBackend::new());
        let query = Query::new();
        let posts: Vec<Post> = query.get(&grammar).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_get_propagates_decoding_failures() {
        let backend = MockBackend::with_rows(vec![row(json!({"id": "not a number"}))]);
        let grammar = MysqlGrammar::new(backend);

        let query = Query::new().select_all().from("posts");
        let result: Result<Vec<Post>> = query.get(&grammar);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_execute_returns_backend_affected_count() {
        let grammar = MysqlGrammar::new(MockBackend::with_affected(1));
        let query = Query::new()
            .update("t")
            .set(("c", "v"))
            .where_(("id", 1));
        assert_eq!(query.execute(&grammar).unwrap(), 1);
    }

    #[test]
    fn test_execute_with_unset_kind_reports_zero() {
        let grammar = MysqlGrammar::new(MockBackend::with_affected(9));
        let query = Query::new().from("t");
        assert_eq!(query.execute(&grammar).unwrap(), 0);
    }
}
