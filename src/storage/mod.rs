//! # Storage Back Ends
//!
//! The query façade never talks to a database directly; it hands compiled
//! predicates to a [`Storage`] implementation:
//!
//! - [`PgStorage`] renders the predicate through the SQL query builder and runs it
//!   against a PostgreSQL pool
//! - [`MemoryStorage`] evaluates the same predicate over in-memory rows with
//!   left-outer join semantics; used by tests and embedders without a database
//!
//! Failures of either back end surface as `StorageUnavailable` and are never
//! retried here.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Entity;
use crate::query_builder::{CompiledPredicate, Page, PageRequest};

/// Read operations required from the storage collaborator
#[async_trait]
pub trait Storage: Send + Sync {
    /// Every matching row, ordered by identifier
    async fn find<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<Vec<E>>;

    /// One page of matching rows plus the total match count
    async fn find_page<E: Entity>(
        &self,
        predicate: &CompiledPredicate<E>,
        request: &PageRequest,
    ) -> Result<Page<E>>;

    /// Number of distinct matching rows
    async fn count<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<i64>;

    async fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>>;
}
