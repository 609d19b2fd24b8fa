//! # Query Builder System
//!
//! The storage-facing half of criteria filtering: compiled predicates and the
//! PostgreSQL text they render to.
//!
//! ## Key Components
//!
//! - [`value`] - Column values with SQL literal rendering and NULL-aware comparison
//! - [`conditions`] - Single-column predicate fragments (comparison, set, null, LIKE)
//! - [`joins`] - Left-outer JOIN clauses derived from schema join paths
//! - [`predicate`] - The compiled predicate: joins plus an AND of conditions
//! - [`pagination`] - Page requests, sort orders and result pages
//! - [`builder`] - SELECT / COUNT generation and execution against a `PgPool`
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use storefront_query::query_builder::{QueryBuilder, PageRequest};
//!
//! let predicate = compile(Some(&criteria))?;
//! let sql = QueryBuilder::from_predicate(predicate.predicate())
//!     .paginate(&PageRequest::of(0, 20))
//!     .build_sql();
//! ```

pub mod builder;
pub mod conditions;
pub mod joins;
pub mod pagination;
pub mod predicate;
pub mod value;

pub use builder::QueryBuilder;
pub use conditions::{ColumnRef, Condition, Operator, RowSource};
pub use joins::{Join, JoinType};
pub use pagination::{Page, PageRequest, SortDirection, SortOrder};
pub use predicate::{CompiledPredicate, Predicate};
pub use value::{column, FromValue, Record, Value};
