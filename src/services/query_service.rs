use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::compiler::compile;
use crate::config::PaginationConfig;
use crate::criteria::Criteria;
use crate::error::{Result, StorefrontError};
use crate::logging::{log_error, log_query_operation};
use crate::models::Entity;
use crate::query_builder::{CompiledPredicate, Page, PageRequest};
use crate::storage::Storage;
use crate::visibility::{CallerIdentity, VisibilityContext, VisibilityPolicy};

/// Criteria query façade shared by every entity
///
/// Each call applies the caller's visibility to the criteria, compiles the
/// result and hands the predicate to storage. The ownership override applies
/// to list, page and count alike.
#[derive(Debug)]
pub struct QueryService<S> {
    storage: Arc<S>,
    pagination: PaginationConfig,
}

impl<S> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            pagination: self.pagination.clone(),
        }
    }
}

impl<S: Storage> QueryService<S> {
    pub fn new(storage: Arc<S>, pagination: PaginationConfig) -> Self {
        Self {
            storage,
            pagination,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// Resolve the visibility of `identity` against this service's storage
    pub async fn visibility_for(&self, identity: &CallerIdentity) -> Result<VisibilityContext> {
        VisibilityPolicy::resolve(identity, self.storage.as_ref()).await
    }

    /// Every entity matching `criteria` that the caller may see
    pub async fn find_by_criteria<C: Criteria>(
        &self,
        criteria: Option<&C>,
        context: &VisibilityContext,
    ) -> Result<Vec<C::Entity>> {
        debug!(entity = entity_name::<C>(), criteria = ?criteria, "find by criteria");
        let start = Instant::now();
        let predicate = self.visible_predicate(criteria, context)?;

        let result = self.storage.find(&predicate).await;
        self.record::<C>("find", &result.as_ref().map(Vec::len), context, start);
        result
    }

    /// One page of visible entities; the page size is clamped to the configured maximum
    pub async fn find_page_by_criteria<C: Criteria>(
        &self,
        criteria: Option<&C>,
        request: &PageRequest,
        context: &VisibilityContext,
    ) -> Result<Page<C::Entity>> {
        debug!(
            entity = entity_name::<C>(),
            criteria = ?criteria,
            page = request.page,
            size = request.size,
            "find page by criteria"
        );
        let start = Instant::now();
        let request = request.clone().clamped(&self.pagination);
        let predicate = self.visible_predicate(criteria, context)?;

        let result = self.storage.find_page(&predicate, &request).await;
        self.record::<C>(
            "find_page",
            &result.as_ref().map(|page| page.content.len()),
            context,
            start,
        );
        result
    }

    /// Number of visible entities matching `criteria`
    pub async fn count_by_criteria<C: Criteria>(
        &self,
        criteria: Option<&C>,
        context: &VisibilityContext,
    ) -> Result<i64> {
        debug!(entity = entity_name::<C>(), criteria = ?criteria, "count by criteria");
        let start = Instant::now();
        let predicate = self.visible_predicate(criteria, context)?;

        let result = self.storage.count(&predicate).await;
        self.record::<C>(
            "count",
            &result
                .as_ref()
                .map(|total| usize::try_from(*total).unwrap_or_default()),
            context,
            start,
        );
        result
    }

    /// The entity with `id`, if it exists and the caller may see it
    pub async fn find_one<C: Criteria>(
        &self,
        id: i64,
        context: &VisibilityContext,
    ) -> Result<Option<C::Entity>> {
        debug!(entity = entity_name::<C>(), id, "find one");
        let start = Instant::now();
        // Ownership is compiled separately so it cannot replace the id filter of
        // a customer, whose ownership field is `id` itself
        let owned = self.visible_predicate::<C>(None, context)?;
        let predicate = owned.and(compile(Some(&C::by_id(id)))?);

        let result = self
            .storage
            .find(&predicate)
            .await
            .map(|rows| rows.into_iter().next());
        self.record::<C>(
            "find_one",
            &result.as_ref().map(|row| usize::from(row.is_some())),
            context,
            start,
        );
        result
    }

    fn visible_predicate<C: Criteria>(
        &self,
        criteria: Option<&C>,
        context: &VisibilityContext,
    ) -> Result<CompiledPredicate<C::Entity>> {
        let visible = VisibilityPolicy::apply(context, criteria);
        compile(visible.as_ref())
    }

    fn record<C: Criteria>(
        &self,
        operation: &str,
        outcome: &std::result::Result<usize, &StorefrontError>,
        context: &VisibilityContext,
        start: Instant,
    ) {
        let elapsed = start.elapsed().as_millis() as u64;
        let visibility = context.to_string();
        match outcome {
            Ok(rows) => log_query_operation(
                operation,
                entity_name::<C>(),
                &visibility,
                "success",
                Some(elapsed),
                Some(format!("rows={rows}").as_str()),
            ),
            Err(err) => log_error("query_service", operation, &err.to_string(), Some(&visibility)),
        }
    }
}

fn entity_name<C: Criteria>() -> &'static str {
    <C::Entity as Entity>::schema().name
}
