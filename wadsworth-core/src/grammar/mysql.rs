//! MySQL grammar implementation

use super::{Grammar, Statement};
use crate::{Backend, Error, Join, Logical, Order, Predicate, Query, Result, Value};

/// Grammar for the MySQL dialect, rendering `?` placeholders.
pub struct MysqlGrammar<B> {
    backend: B,
}

impl<B> MysqlGrammar<B> {
    /// Create a grammar over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> Grammar for MysqlGrammar<B> {
    type Backend = B;

    fn backend(&self) -> &B {
        &self.backend
    }

    fn select_statement(&self, query: &Query) -> Result<Statement> {
        let table = required_table(query, "SELECT")?;

        let mut sql = String::from("SELECT ");
        if query.is_distinct() {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&query.columns().join(", "));
        sql.push_str(" FROM ");
        sql.push_str(table);

        let mut bindings = Vec::new();
        joins_to_sql(query.joins(), &mut sql);
        predicates_to_sql("WHERE", query.wheres(), &mut sql, &mut bindings);
        if !query.group_by_columns().is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&query.group_by_columns().join(", "));
        }
        predicates_to_sql("HAVING", query.havings(), &mut sql, &mut bindings);
        orders_to_sql(query.orders(), &mut sql);
        if let Some(limit) = query.limit_value() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = query.offset_value() {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        Ok(Statement { sql, bindings })
    }

    fn insert_statement(&self, query: &Query) -> Result<Statement> {
        let table = required_table(query, "INSERT")?;
        if query.insert_values().is_empty() {
            return Err(Error::invalid_query("INSERT requires values"));
        }

        let mut columns = Vec::with_capacity(query.insert_values().len());
        let mut placeholders = Vec::with_capacity(query.insert_values().len());
        let mut bindings = Vec::with_capacity(query.insert_values().len());
        for (column, value) in query.insert_values() {
            columns.push(column.as_str());
            placeholders.push("?");
            bindings.push(value.clone());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );

        Ok(Statement { sql, bindings })
    }

    fn update_statement(&self, query: &Query) -> Result<Statement> {
        let table = required_table(query, "UPDATE")?;
        if query.sets().is_empty() {
            return Err(Error::invalid_query("UPDATE requires columns to set"));
        }

        let mut sql = String::from("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET ");

        let mut bindings = Vec::new();
        let mut set_parts = Vec::with_capacity(query.sets().len());
        for (column, value) in query.sets() {
            set_parts.push(format!("{} = ?", column));
            bindings.push(value.clone());
        }
        sql.push_str(&set_parts.join(", "));

        predicates_to_sql("WHERE", query.wheres(), &mut sql, &mut bindings);
        orders_to_sql(query.orders(), &mut sql);
        if let Some(limit) = query.limit_value() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(Statement { sql, bindings })
    }

    fn delete_statement(&self, query: &Query) -> Result<Statement> {
        let table = required_table(query, "DELETE")?;

        let mut sql = String::from("DELETE FROM ");
        sql.push_str(table);

        let mut bindings = Vec::new();
        predicates_to_sql("WHERE", query.wheres(), &mut sql, &mut bindings);
        orders_to_sql(query.orders(), &mut sql);
        if let Some(limit) = query.limit_value() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(Statement { sql, bindings })
    }
}

fn required_table<'a>(query: &'a Query, kind: &str) -> Result<&'a str> {
    if query.table().is_empty() {
        return Err(Error::invalid_query(format!("{} requires a table", kind)));
    }
    Ok(query.table())
}

// Emits the predicate SQL and its bindings in one pass so placeholder order
// and binding order cannot drift apart.
fn predicates_to_sql(
    keyword: &str,
    predicates: &[Predicate],
    sql: &mut String,
    bindings: &mut Vec<Value>,
) {
    if predicates.is_empty() {
        return;
    }

    sql.push(' ');
    sql.push_str(keyword);
    sql.push(' ');
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            sql.push_str(match predicate.logical {
                Logical::And => " AND ",
                Logical::Or => " OR ",
            });
        }
        sql.push_str(&predicate.column);
        sql.push(' ');
        sql.push_str(predicate.operator.as_str());
        sql.push_str(" ?");
        bindings.push(predicate.value.clone());
    }
}

fn joins_to_sql(joins: &[Join], sql: &mut String) {
    for join in joins {
        sql.push(' ');
        sql.push_str(&join.kind.to_string());
        sql.push(' ');
        sql.push_str(&join.table);
        if let Some(on) = &join.on {
            sql.push_str(" ON ");
            sql.push_str(&on.first);
            sql.push(' ');
            sql.push_str(on.operator.as_str());
            sql.push(' ');
            sql.push_str(&on.second);
        }
    }
}

fn orders_to_sql(orders: &[Order], sql: &mut String) {
    if orders.is_empty() {
        return;
    }

    sql.push_str(" ORDER BY ");
    let parts: Vec<String> = orders
        .iter()
        .map(|order| format!("{} {}", order.column, order.direction))
        .collect();
    sql.push_str(&parts.join(", "));
}
