use std::fmt;
use std::marker::PhantomData;

use super::conditions::{Condition, RowSource};
use super::joins::Join;
use crate::schema::EntitySchema;

/// A composed boolean expression over one entity's rows: the conjunction of its
/// conditions, evaluated over the entity table left-joined with `joins`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    schema: &'static EntitySchema,
    joins: Vec<Join>,
    conditions: Vec<Condition>,
}

impl Predicate {
    /// The unconstrained predicate
    pub fn match_all(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            joins: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Add a join unless one with the same alias is already present
    pub fn add_join(&mut self, join: Join) {
        if !self.joins.iter().any(|existing| existing.alias == join.alias) {
            self.joins.push(join);
        }
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Logical AND of two predicates over the same entity
    pub fn and(mut self, other: Predicate) -> Predicate {
        debug_assert_eq!(self.schema.table, other.schema.table);
        for join in other.joins {
            self.add_join(join);
        }
        self.conditions.extend(other.conditions);
        self
    }

    /// Conditions joined with AND, or `None` when unconstrained
    pub fn to_where_sql(&self) -> Option<String> {
        if self.conditions.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.conditions.iter().map(Condition::to_sql).collect();
        Some(parts.join(" AND "))
    }

    /// True when every condition holds for the joined row
    pub fn matches(&self, row: &dyn RowSource) -> bool {
        self.conditions.iter().all(|condition| condition.matches(row))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_where_sql().unwrap_or_else(|| "TRUE".to_string()))
    }
}

/// A [`Predicate`] tagged with the entity type it was compiled for
pub struct CompiledPredicate<E> {
    inner: Predicate,
    entity: PhantomData<fn() -> E>,
}

impl<E> CompiledPredicate<E> {
    pub(crate) fn new(inner: Predicate) -> Self {
        Self {
            inner,
            entity: PhantomData,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.inner
    }

    pub fn into_predicate(self) -> Predicate {
        self.inner
    }

    pub fn and(self, other: CompiledPredicate<E>) -> Self {
        Self::new(self.inner.and(other.inner))
    }
}

impl<E> Clone for CompiledPredicate<E> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<E> PartialEq for CompiledPredicate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<E> fmt::Debug for CompiledPredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPredicate").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::conditions::{ColumnRef, Operator};
    use crate::query_builder::value::Value;
    use crate::schema::{FieldDef, JoinStep};

    const ORDER: JoinStep = JoinStep::to_one("order", "product_order", "order_id");

    static SAMPLE: EntitySchema = EntitySchema {
        name: "Sample",
        table: "sample",
        columns: &["id", "order_id"],
        fields: &[FieldDef::column("id")],
    };

    fn id_equals(id: i64) -> Condition {
        Condition::Simple {
            field: ColumnRef::new("sample", "id"),
            operator: Operator::Eq,
            value: Value::Int(id),
        }
    }

    #[test]
    fn test_match_all_has_no_where_clause() {
        let predicate = Predicate::match_all(&SAMPLE);
        assert!(predicate.is_unconstrained());
        assert_eq!(predicate.to_where_sql(), None);
        assert_eq!(predicate.to_string(), "TRUE");
    }

    #[test]
    fn test_and_merges_joins_and_conditions() {
        let join = Join::for_path(&SAMPLE, &[ORDER]).unwrap();

        let mut left = Predicate::match_all(&SAMPLE);
        left.add_join(join.clone());
        left.push(id_equals(1));

        let mut right = Predicate::match_all(&SAMPLE);
        right.add_join(join);
        right.push(id_equals(2));

        let combined = left.and(right);
        assert_eq!(combined.joins().len(), 1);
        assert_eq!(
            combined.to_where_sql().unwrap(),
            "sample.id = 1 AND sample.id = 2"
        );
    }
}
