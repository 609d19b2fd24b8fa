use sqlx::{PgPool, Row};

use super::{Condition, Join, PageRequest, Predicate, SortDirection};
use crate::schema::EntitySchema;

/// SQL builder for criteria queries against one entity table
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    schema: &'static EntitySchema,
    select_fields: Vec<String>,
    distinct: bool,
    joins: Vec<Join>,
    where_clauses: Vec<Condition>,
    order_by: Vec<String>,
    pagination: Option<PageRequest>,
}

impl QueryBuilder {
    /// Create a new query builder selecting every column of the entity
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            select_fields: schema.qualified_columns(),
            distinct: false,
            joins: Vec::new(),
            where_clauses: Vec::new(),
            order_by: Vec::new(),
            pagination: None,
        }
    }

    /// Start from a compiled predicate; joined queries select DISTINCT base rows
    pub fn from_predicate(predicate: &Predicate) -> Self {
        let mut query = Self::new(predicate.schema());
        for join in predicate.joins() {
            query = query.join(join.clone());
        }
        for condition in predicate.conditions() {
            query = query.where_condition(condition.clone());
        }
        query
    }

    /// Add a JOIN clause
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self.distinct = true;
        self
    }

    /// Add a WHERE condition
    pub fn where_condition(mut self, condition: Condition) -> Self {
        self.where_clauses.push(condition);
        self
    }

    /// Add ORDER BY clause on a column of the base table
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order_by.push(format!(
            "{}.{} {}",
            self.schema.table,
            column,
            direction.to_sql()
        ));
        self
    }

    /// Add ORDER BY ASC
    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    /// Add ORDER BY DESC
    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Apply the request's ordering (ties broken by `id`) and LIMIT/OFFSET
    pub fn paginate(mut self, request: &PageRequest) -> Self {
        for order in &request.sort {
            self = self.order_by(&order.property, order.direction);
        }
        if !request.sort.iter().any(|order| order.property == "id") {
            self = self.order_asc("id");
        }
        self.pagination = Some(request.clone());
        self
    }

    /// Build the complete SQL query string
    pub fn build_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.select_fields.join(", "));

        self.push_from_and_where(&mut sql);

        // ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        // LIMIT/OFFSET
        if let Some(ref pagination) = self.pagination {
            sql.push_str(&pagination.to_sql());
        }

        sql
    }

    /// Build the matching COUNT query; joined rows are counted once per entity
    pub fn count_sql(&self) -> String {
        let mut sql = if self.distinct {
            format!("SELECT COUNT(DISTINCT {}.id)", self.schema.table)
        } else {
            "SELECT COUNT(*)".to_string()
        };
        self.push_from_and_where(&mut sql);
        sql
    }

    fn push_from_and_where(&self, sql: &mut String) {
        sql.push_str(&format!(" FROM {}", self.schema.table));

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> =
                self.where_clauses.iter().map(Condition::to_sql).collect();
            sql.push_str(&where_parts.join(" AND "));
        }
    }

    /// Execute the query and return all rows
    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let sql = self.build_sql();
        sqlx::query_as::<_, T>(&sql).fetch_all(pool).await
    }

    /// Execute the query and return optional row
    pub async fn fetch_optional<T>(&self, pool: &PgPool) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let sql = self.build_sql();
        sqlx::query_as::<_, T>(&sql).fetch_optional(pool).await
    }

    /// Execute count query
    pub async fn count(&self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        let sql = self.count_sql();
        let row = sqlx::query(&sql).fetch_one(pool).await?;

        Ok(row.get::<i64, _>(0))
    }
}
