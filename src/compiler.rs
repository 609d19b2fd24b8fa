//! # Predicate Compiler
//!
//! Folds every present filter of a criteria aggregate into one [`Predicate`]
//! over the aggregate's entity. The compiler knows nothing about individual
//! entities: the field table of the entity's [`EntitySchema`] decides whether a
//! filter reads an own column or the identifier at the end of a join path.
//!
//! Related-identifier filters left-outer join every hop of their path once per
//! predicate. Rows without a related entity survive the join with a NULL
//! identifier, which no comparison matches.

use crate::criteria::Criteria;
use crate::error::{Result, StorefrontError};
use crate::models::Entity;
use crate::query_builder::{ColumnRef, CompiledPredicate, Join, Predicate};
use crate::schema::{join_alias, EntitySchema, FieldTarget};

/// Compile `criteria` into a predicate; `None` is the unconstrained predicate
pub fn compile<C: Criteria>(criteria: Option<&C>) -> Result<CompiledPredicate<C::Entity>> {
    let schema = <C::Entity as Entity>::schema();
    let mut predicate = Predicate::match_all(schema);

    let Some(criteria) = criteria else {
        return Ok(CompiledPredicate::new(predicate));
    };

    for (name, filter) in criteria.filters() {
        if filter.is_empty() {
            continue;
        }
        let column = resolve_field(schema, name, &mut predicate)?;
        for condition in filter.conditions(&column) {
            predicate.push(condition);
        }
    }

    tracing::debug!(
        entity = schema.name,
        joins = predicate.joins().len(),
        predicate = %predicate,
        "compiled criteria"
    );
    Ok(CompiledPredicate::new(predicate))
}

/// Column a field filter applies to, adding the joins its path needs
fn resolve_field(
    schema: &'static EntitySchema,
    name: &str,
    predicate: &mut Predicate,
) -> Result<ColumnRef> {
    let field = schema.field(name).ok_or_else(|| {
        StorefrontError::validation(format!("unknown filter field '{}' for {}", name, schema.name))
    })?;

    match field.target {
        FieldTarget::Column(column) => Ok(ColumnRef::new(schema.table, column)),
        FieldTarget::Related(path) => {
            for hop in 1..=path.len() {
                if let Some(join) = Join::for_path(schema, &path[..hop]) {
                    predicate.add_join(join);
                }
            }
            Ok(ColumnRef::new(join_alias(path), "id"))
        }
    }
}
