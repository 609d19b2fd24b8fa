use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Instant;

use super::Storage;
use crate::error::Result;
use crate::logging::log_database_operation;
use crate::models::Entity;
use crate::query_builder::{
    ColumnRef, CompiledPredicate, Condition, Operator, Page, PageRequest, QueryBuilder, Value,
};

/// [`Storage`] over a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn find<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<Vec<E>> {
        let start = Instant::now();
        let query = QueryBuilder::from_predicate(predicate.predicate()).order_asc("id");
        let rows = query.fetch_all::<E>(&self.pool).await?;

        log_database_operation(
            "find",
            Some(E::schema().table),
            None,
            "success",
            Some(start.elapsed().as_millis() as u64),
            None,
        );
        Ok(rows)
    }

    async fn find_page<E: Entity>(
        &self,
        predicate: &CompiledPredicate<E>,
        request: &PageRequest,
    ) -> Result<Page<E>> {
        request.validate(E::schema())?;
        let start = Instant::now();

        let query = QueryBuilder::from_predicate(predicate.predicate());
        let total = query.count(&self.pool).await?;
        let content = query.paginate(request).fetch_all::<E>(&self.pool).await?;

        log_database_operation(
            "find_page",
            Some(E::schema().table),
            None,
            "success",
            Some(start.elapsed().as_millis() as u64),
            Some(format!("page={} size={} total={}", request.page, request.size, total).as_str()),
        );
        Ok(Page::new(content, total, request))
    }

    async fn count<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<i64> {
        let total = QueryBuilder::from_predicate(predicate.predicate())
            .count(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        let schema = E::schema();
        let row = QueryBuilder::new(schema)
            .where_condition(Condition::Simple {
                field: ColumnRef::new(schema.table, "id"),
                operator: Operator::Eq,
                value: Value::Int(id),
            })
            .fetch_optional::<E>(&self.pool)
            .await?;

        log_database_operation(
            "find_by_id",
            Some(schema.table),
            Some(id),
            if row.is_some() { "found" } else { "missing" },
            None,
            None,
        );
        Ok(row)
    }
}
