use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use super::Storage;
use crate::error::{Result, StorefrontError};
use crate::models::Entity;
use crate::query_builder::{
    ColumnRef, CompiledPredicate, Join, Page, PageRequest, Predicate, Record, RowSource,
    SortDirection, Value,
};

/// In-memory [`Storage`]: one vector of records per table
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<HashMap<&'static str, Vec<Record>>>,
    unavailable: AtomicBool,
}

/// A base row plus the row bound to each join alias (`None` for an unmatched outer join)
struct JoinedRow<'a> {
    base_alias: &'static str,
    base: &'a Record,
    bound: Vec<(&'a str, Option<&'a Record>)>,
}

impl RowSource for JoinedRow<'_> {
    fn lookup(&self, column: &ColumnRef) -> Option<&Value> {
        if column.alias == self.base_alias {
            return self.base.get(column.column);
        }
        self.bound
            .iter()
            .find(|(alias, _)| *alias == column.alias)
            .and_then(|(_, record)| *record)
            .and_then(|record| record.get(column.column))
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity, replacing any row with the same identifier
    pub fn insert<E: Entity>(&self, entity: &E) {
        let record = entity.to_record();
        let mut tables = self.tables.write();
        let rows = tables.entry(E::schema().table).or_default();
        match rows.iter_mut().find(|row| row.get("id") == record.get("id")) {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
    }

    pub fn insert_all<'a, E: Entity>(&self, entities: impl IntoIterator<Item = &'a E>) {
        for entity in entities {
            self.insert(entity);
        }
    }

    pub fn len<E: Entity>(&self) -> usize {
        self.tables
            .read()
            .get(E::schema().table)
            .map_or(0, Vec::len)
    }

    pub fn clear(&self) {
        self.tables.write().clear();
    }

    /// Make every operation fail with `StorageUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StorefrontError::StorageUnavailable(
                "in-memory storage is offline".to_string(),
            ));
        }
        Ok(())
    }

    /// Distinct base records matching the predicate, in insertion order
    fn matching(&self, predicate: &Predicate) -> Result<Vec<Record>> {
        self.ensure_available()?;
        let tables = self.tables.read();
        let schema = predicate.schema();
        let Some(rows) = tables.get(schema.table) else {
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for base in rows {
            let expanded = expand(schema.table, base, predicate.joins(), &tables);
            if expanded.iter().any(|row| predicate.matches(row)) {
                matched.push(base.clone());
            }
        }
        Ok(matched)
    }

    fn load<E: Entity>(records: Vec<Record>) -> Result<Vec<E>> {
        records.iter().map(E::from_record).collect()
    }
}

/// Left-outer join expansion: one output row per combination of joined rows
fn expand<'a>(
    base_alias: &'static str,
    base: &'a Record,
    joins: &'a [Join],
    tables: &'a HashMap<&'static str, Vec<Record>>,
) -> Vec<JoinedRow<'a>> {
    let mut rows = vec![JoinedRow {
        base_alias,
        base,
        bound: Vec::new(),
    }];

    for join in joins {
        let candidates = tables.get(join.table).map(Vec::as_slice).unwrap_or(&[]);
        let mut next = Vec::new();
        for row in rows {
            let parent = row.lookup(&join.parent).cloned().unwrap_or(Value::Null);
            let partners: Vec<&Record> = candidates
                .iter()
                .filter(|candidate| {
                    let joined = candidate.get(join.joined.column).unwrap_or(&Value::Null);
                    joined.sql_eq(&parent) == Some(true)
                })
                .collect();

            if partners.is_empty() {
                let mut bound = row.bound.clone();
                bound.push((join.alias.as_str(), None));
                next.push(JoinedRow { bound, ..row });
            } else {
                for partner in partners {
                    let mut bound = row.bound.clone();
                    bound.push((join.alias.as_str(), Some(partner)));
                    next.push(JoinedRow {
                        base_alias: row.base_alias,
                        base: row.base,
                        bound,
                    });
                }
            }
        }
        rows = next;
    }
    rows
}

/// PostgreSQL ordering: NULLs sort last ascending and first descending
fn compare_column(a: &Record, b: &Record, column: &str, direction: SortDirection) -> Ordering {
    let left = a.get(column).unwrap_or(&Value::Null);
    let right = b.get(column).unwrap_or(&Value::Null);
    let ascending = match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.sql_cmp(right).unwrap_or(Ordering::Equal),
    };
    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

fn sort_records(records: &mut [Record], request: Option<&PageRequest>) {
    records.sort_by(|a, b| {
        let sorted = request.map(|r| r.sort.as_slice()).unwrap_or(&[]);
        sorted
            .iter()
            .map(|order| compare_column(a, b, &order.property, order.direction))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| compare_column(a, b, "id", SortDirection::Asc))
    });
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<Vec<E>> {
        let mut records = self.matching(predicate.predicate())?;
        sort_records(&mut records, None);
        Self::load(records)
    }

    async fn find_page<E: Entity>(
        &self,
        predicate: &CompiledPredicate<E>,
        request: &PageRequest,
    ) -> Result<Page<E>> {
        request.validate(E::schema())?;
        let mut records = self.matching(predicate.predicate())?;
        sort_records(&mut records, Some(request));

        let total = records.len() as i64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let window: Vec<Record> = records
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .collect();
        Ok(Page::new(Self::load(window)?, total, request))
    }

    async fn count<E: Entity>(&self, predicate: &CompiledPredicate<E>) -> Result<i64> {
        Ok(self.matching(predicate.predicate())?.len() as i64)
    }

    async fn find_by_id<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        self.ensure_available()?;
        let record = self.tables.read().get(E::schema().table).and_then(|rows| {
            rows.iter()
                .find(|row| row.get("id") == Some(&Value::Int(id)))
                .cloned()
        });
        record.as_ref().map(E::from_record).transpose()
    }
}
