//! Query state accumulator
//!
//! A [`Query`] records the declared shape of one SQL statement: the statement
//! kind, the target table, and every clause accumulated so far. It emits no
//! SQL itself; a [`Grammar`](crate::Grammar) reads the state and renders it.

use crate::{IntoOperator, Operator, Value};

/// The top-level operation a query represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// How a predicate combines with the preceding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logical {
    And,
    Or,
}

/// One comparison entry in a WHERE or HAVING list.
///
/// The `logical` tag of the first entry in a list is recorded but never
/// rendered, since it has no predecessor to combine with.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
    pub logical: Logical,
}

/// JOIN variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Join,
    Inner,
    Left,
    Right,
    Cross,
    Natural,
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKind::Join => write!(f, "JOIN"),
            JoinKind::Inner => write!(f, "INNER JOIN"),
            JoinKind::Left => write!(f, "LEFT JOIN"),
            JoinKind::Right => write!(f, "RIGHT JOIN"),
            JoinKind::Cross => write!(f, "CROSS JOIN"),
            JoinKind::Natural => write!(f, "NATURAL JOIN"),
        }
    }
}

/// The ON condition of a join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOn {
    pub first: String,
    pub operator: Operator,
    pub second: String,
}

/// A complete join clause. Cross and natural joins carry no ON condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: Option<JoinOn>,
}

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Mutable state for one SQL statement.
///
/// A query is created empty, populated through an arbitrary sequence of
/// chained calls, and consumed by a grammar any number of times; rendering
/// never mutates the state. Instances are not meant to be shared across
/// threads.
///
/// # Examples
/// ```
/// use wadsworth_core::{Query, op};
///
/// let query = Query::new()
///     .select(("id", "name"))
///     .from("users")
///     .where_(("age", op::GT, 18))
///     .order_by_desc("created_at")
///     .limit(10);
/// assert_eq!(query.table(), "users");
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    kind: Option<QueryKind>,
    table: String,
    distinct: bool,
    columns: Vec<String>,
    sets: Vec<(String, Value)>,
    values: Vec<(String, Value)>,
    wheres: Vec<Predicate>,
    havings: Vec<Predicate>,
    joins: Vec<Join>,
    group_by: Vec<String>,
    orders: Vec<Order>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Create a new, empty query.
    pub fn new() -> Self {
        Self {
            kind: None,
            table: String::new(),
            distinct: false,
            columns: vec!["*".to_string()],
            sets: Vec::new(),
            values: Vec::new(),
            wheres: Vec::new(),
            havings: Vec::new(),
            joins: Vec::new(),
            group_by: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Mark the query as a SELECT and set the output columns, replacing any
    /// previously selected columns.
    ///
    /// # Examples
    /// ```
    /// use wadsworth_core::Query;
    ///
    /// let query = Query::new().select(("id", "name")).from("users");
    /// assert_eq!(query.columns(), ["id", "name"]);
    /// ```
    pub fn select<C>(mut self, columns: C) -> Self
    where
        C: IntoColumns,
    {
        self.kind = Some(QueryKind::Select);
        self.columns = columns.into_columns();
        self
    }

    /// Mark the query as a SELECT over all columns, resetting the column list
    /// to the single wildcard entry.
    pub fn select_all(mut self) -> Self {
        self.kind = Some(QueryKind::Select);
        self.columns = vec!["*".to_string()];
        self
    }

    /// Make the query return distinct results.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the table the query targets.
    pub fn from(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Set the table to insert into. Alias of [`from`](Self::from), provided
    /// for readability: `insert().into_table("users")`.
    pub fn into_table(self, table: &str) -> Self {
        self.from(table)
    }

    /// Mark the query as an UPDATE targeting the given table.
    pub fn update(mut self, table: &str) -> Self {
        self.kind = Some(QueryKind::Update);
        self.table = table.to_string();
        self
    }

    /// Mark the query as an INSERT. The target table is set separately with
    /// [`into_table`](Self::into_table).
    pub fn insert(mut self) -> Self {
        self.kind = Some(QueryKind::Insert);
        self
    }

    /// Mark the query as a DELETE. The target table is set separately with
    /// [`from`](Self::from).
    pub fn delete(mut self) -> Self {
        self.kind = Some(QueryKind::Delete);
        self
    }

    /// Add column assignments for an UPDATE. Assigning a column that is
    /// already present overwrites its value in place, keeping its position.
    ///
    /// # Examples
    /// ```
    /// use wadsworth_core::Query;
    ///
    /// let query = Query::new()
    ///     .update("users")
    ///     .set(("name", "John Doe"))
    ///     .set(vec![("age", 42), ("score", 100)]);
    /// ```
    pub fn set<A>(mut self, assignments: A) -> Self
    where
        A: IntoAssignments,
    {
        assign(&mut self.sets, assignments.into_assignments());
        self
    }

    /// Add column values for an INSERT. The keys become the column list and
    /// the values the VALUES tuple, in insertion order; re-assigned columns
    /// keep their original position.
    pub fn values<A>(mut self, assignments: A) -> Self
    where
        A: IntoAssignments,
    {
        assign(&mut self.values, assignments.into_assignments());
        self
    }

    /// Add a plain JOIN clause.
    ///
    /// # Examples
    /// ```
    /// use wadsworth_core::Query;
    ///
    /// let query = Query::new()
    ///     .select_all()
    ///     .from("posts")
    ///     .join("postmeta", "posts.id", "=", "postmeta.post_id");
    /// ```
    pub fn join<O>(self, table: &str, first: &str, operator: O, second: &str) -> Self
    where
        O: IntoOperator,
    {
        self.add_join(JoinKind::Join, table, Some(join_on(first, operator, second)))
    }

    /// Add an INNER JOIN clause.
    pub fn inner_join<O>(self, table: &str, first: &str, operator: O, second: &str) -> Self
    where
        O: IntoOperator,
    {
        self.add_join(
            JoinKind::Inner,
            table,
            Some(join_on(first, operator, second)),
        )
    }

    /// Add a LEFT JOIN clause.
    pub fn left_join<O>(self, table: &str, first: &str, operator: O, second: &str) -> Self
    where
        O: IntoOperator,
    {
        self.add_join(JoinKind::Left, table, Some(join_on(first, operator, second)))
    }

    /// Add a RIGHT JOIN clause.
    pub fn right_join<O>(self, table: &str, first: &str, operator: O, second: &str) -> Self
    where
        O: IntoOperator,
    {
        self.add_join(
            JoinKind::Right,
            table,
            Some(join_on(first, operator, second)),
        )
    }

    /// Add a CROSS JOIN clause. Cross joins carry no ON condition.
    pub fn cross_join(self, table: &str) -> Self {
        self.add_join(JoinKind::Cross, table, None)
    }

    /// Add a NATURAL JOIN clause. Natural joins carry no ON condition.
    pub fn natural_join(self, table: &str) -> Self {
        self.add_join(JoinKind::Natural, table, None)
    }

    fn add_join(mut self, kind: JoinKind, table: &str, on: Option<JoinOn>) -> Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            on,
        });
        self
    }

    /// Add WHERE predicates combined with AND.
    ///
    /// Accepts a `(column, value)` pair defaulting to `=`, an explicit
    /// `(column, operator, value)` triple, or a list of either shape which
    /// expands to one predicate per entry, in order.
    ///
    /// # Examples
    /// ```
    /// use wadsworth_core::{Query, op};
    ///
    /// let query = Query::new()
    ///     .select_all()
    ///     .from("users")
    ///     .where_(("age", op::GT, 18))
    ///     .where_(("status", "active"));
    /// assert_eq!(query.wheres().len(), 2);
    /// ```
    pub fn where_<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.add_where(Logical::And, conditions)
    }

    /// Add WHERE predicates combined with AND. Alias of
    /// [`where_`](Self::where_), provided for clarity.
    pub fn and_where<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.where_(conditions)
    }

    /// Add WHERE predicates combined with OR.
    pub fn or_where<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.add_where(Logical::Or, conditions)
    }

    fn add_where<C>(mut self, logical: Logical, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        for (column, operator, value) in conditions.into_conditions() {
            self.wheres.push(Predicate {
                column,
                operator,
                value,
                logical,
            });
        }
        self
    }

    /// Add HAVING predicates combined with AND. Accepts the same call shapes
    /// as [`where_`](Self::where_).
    pub fn having<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.add_having(Logical::And, conditions)
    }

    /// Add HAVING predicates combined with AND. Alias of
    /// [`having`](Self::having).
    pub fn and_having<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.having(conditions)
    }

    /// Add HAVING predicates combined with OR.
    pub fn or_having<C>(self, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        self.add_having(Logical::Or, conditions)
    }

    fn add_having<C>(mut self, logical: Logical, conditions: C) -> Self
    where
        C: IntoConditions,
    {
        for (column, operator, value) in conditions.into_conditions() {
            self.havings.push(Predicate {
                column,
                operator,
                value,
                logical,
            });
        }
        self
    }

    /// Add a column to group by. Can be called multiple times to group by
    /// multiple columns.
    pub fn group_by(mut self, column: &str) -> Self {
        self.group_by.push(column.to_string());
        self
    }

    /// Add an ORDER BY entry with an explicit direction.
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.orders.push(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Add an ascending ORDER BY entry.
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, Direction::Asc)
    }

    /// Add a descending ORDER BY entry.
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// Set the maximum number of records to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of records to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    // Read accessors, used by grammars to render the accumulated state.

    /// The statement kind, or `None` before any kind-defining call.
    pub fn kind(&self) -> Option<QueryKind> {
        self.kind
    }

    /// The target table. Empty until set.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The SELECT output columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the query returns distinct results.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// The UPDATE assignments, in insertion order.
    pub fn sets(&self) -> &[(String, Value)] {
        &self.sets
    }

    /// The INSERT column/value pairs, in insertion order.
    pub fn insert_values(&self) -> &[(String, Value)] {
        &self.values
    }

    /// The WHERE predicates, in call order.
    pub fn wheres(&self) -> &[Predicate] {
        &self.wheres
    }

    /// The HAVING predicates, in call order.
    pub fn havings(&self) -> &[Predicate] {
        &self.havings
    }

    /// The join clauses, in call order.
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// The GROUP BY columns, in call order.
    pub fn group_by_columns(&self) -> &[String] {
        &self.group_by
    }

    /// The ORDER BY entries, in call order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The maximum number of records to return, if set.
    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    /// The number of records to skip, if set.
    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }
}

fn join_on<O>(first: &str, operator: O, second: &str) -> JoinOn
where
    O: IntoOperator,
{
    JoinOn {
        first: first.to_string(),
        operator: operator.into_operator(),
        second: second.to_string(),
    }
}

// Ordered-mapping merge: existing columns are overwritten in place so a later
// assignment does not move the column to the end of the list.
fn assign(entries: &mut Vec<(String, Value)>, pairs: Vec<(String, Value)>) {
    for (column, value) in pairs {
        match entries.iter_mut().find(|(existing, _)| *existing == column) {
            Some(entry) => entry.1 = value,
            None => entries.push((column, value)),
        }
    }
}

/// Trait for types that can be converted to WHERE/HAVING predicates
pub trait IntoConditions {
    fn into_conditions(self) -> Vec<(String, Operator, Value)>;
}

// Shorthand equality: where_(("age", 18))
impl<V> IntoConditions for (&str, V)
where
    V: Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        vec![(self.0.to_string(), Operator::EQ, self.1.into())]
    }
}

// Explicit operators: where_(("age", op::GT, 18)) or where_(("age", ">", 18))
impl<O, V> IntoConditions for (&str, O, V)
where
    O: IntoOperator,
    V: Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        vec![(self.0.to_string(), self.1.into_operator(), self.2.into())]
    }
}

// Mapping shape: where_(vec![("id", 1), ("parent", 7)]) expands to one
// equality predicate per entry, preserving entry order.
impl<V> IntoConditions for Vec<(&str, V)>
where
    V: Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), Operator::EQ, value.into()))
            .collect()
    }
}

// List-of-triples shape: where_(vec![("id", ">", 1), ("id", "<", 9)])
impl<O, V> IntoConditions for Vec<(&str, O, V)>
where
    O: IntoOperator,
    V: Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        self.into_iter()
            .map(|(column, operator, value)| {
                (column.to_string(), operator.into_operator(), value.into())
            })
            .collect()
    }
}

impl<V> IntoConditions for &[(&str, V)]
where
    V: Clone + Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        self.iter()
            .map(|(column, value)| (column.to_string(), Operator::EQ, value.clone().into()))
            .collect()
    }
}

impl<O, V> IntoConditions for &[(&str, O, V)]
where
    O: Clone + IntoOperator,
    V: Clone + Into<Value>,
{
    fn into_conditions(self) -> Vec<(String, Operator, Value)> {
        self.iter()
            .map(|(column, operator, value)| {
                (
                    column.to_string(),
                    operator.clone().into_operator(),
                    value.clone().into(),
                )
            })
            .collect()
    }
}

/// Trait for types that can be converted to column lists
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<String> {
        self
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

// For tuples
impl IntoColumns for (&str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string(), self.2.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![
            self.0.to_string(),
            self.1.to_string(),
            self.2.to_string(),
            self.3.to_string(),
        ]
    }
}

impl IntoColumns for (&str, &str, &str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![
            self.0.to_string(),
            self.1.to_string(),
            self.2.to_string(),
            self.3.to_string(),
            self.4.to_string(),
        ]
    }
}

/// Trait for types that can be converted to SET/VALUES assignments
pub trait IntoAssignments {
    fn into_assignments(self) -> Vec<(String, Value)>;
}

// Single pair: set(("name", "John"))
impl<V> IntoAssignments for (&str, V)
where
    V: Into<Value>,
{
    fn into_assignments(self) -> Vec<(String, Value)> {
        vec![(self.0.to_string(), self.1.into())]
    }
}

// Mapping shape: set(vec![("name", "John"), ("age", 42)])
impl<V> IntoAssignments for Vec<(&str, V)>
where
    V: Into<Value>,
{
    fn into_assignments(self) -> Vec<(String, Value)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), value.into()))
            .collect()
    }
}

impl<V> IntoAssignments for &[(&str, V)]
where
    V: Clone + Into<Value>,
{
    fn into_assignments(self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(column, value)| (column.to_string(), value.clone().into()))
            .collect()
    }
}
