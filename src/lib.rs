#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Storefront Query
//!
//! Criteria filtering and ownership visibility for the storefront back office.
//!
//! ## Overview
//!
//! Every list endpoint of the back office accepts flat `field.operator=value`
//! parameters. This crate turns them into one composed query:
//!
//! 1. request parameters bind into a typed criteria aggregate ([`criteria`])
//! 2. the [`visibility`] policy forces the caller's ownership filter unless the
//!    caller is an administrator
//! 3. the [`compiler`] folds every present filter into one predicate, joining
//!    related entities left-outer where a filter needs their identifier
//! 4. a [`storage`] back end runs the predicate as a list, a page or a count
//!
//! ## Module Organization
//!
//! - [`models`] - Entities with their schema tables
//! - [`constants`] - Enumerated column types
//! - [`schema`] - Field tables and join paths
//! - [`filter`] - Per-field filter value objects
//! - [`criteria`] - Per-entity criteria aggregates and request binding
//! - [`compiler`] - Criteria to predicate compilation
//! - [`query_builder`] - Predicates, SQL rendering and pagination
//! - [`visibility`] - Caller identity and ownership override
//! - [`storage`] - PostgreSQL and in-memory back ends
//! - [`services`] - The query façade
//! - [`database`] - Connection pool and migrations
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_query::config::ConfigLoader;
//! use storefront_query::criteria::{Criteria, InvoiceCriteria};
//! use storefront_query::database::DatabaseConnection;
//! use storefront_query::query_builder::PageRequest;
//! use storefront_query::services::QueryService;
//! use storefront_query::visibility::CallerIdentity;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! let db = DatabaseConnection::connect(&config.database).await?;
//! let service = QueryService::new(Arc::new(db.storage()), config.pagination.clone());
//!
//! let context = service.visibility_for(&CallerIdentity::user(42)).await?;
//! let criteria = InvoiceCriteria::from_query_string("code.contains=INV&status.equals=PAID")?;
//! let page = service
//!     .find_page_by_criteria(Some(&criteria), &PageRequest::first(&config.pagination), &context)
//!     .await?;
//! println!("{} of {} invoices", page.content.len(), page.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod config;
pub mod constants;
pub mod criteria;
pub mod database;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod schema;
pub mod services;
pub mod storage;
pub mod visibility;

pub use compiler::compile;
pub use config::StorefrontConfig;
pub use criteria::Criteria;
pub use error::{Result, StorefrontError};
pub use services::QueryService;
pub use storage::{MemoryStorage, PgStorage, Storage};
pub use visibility::{CallerIdentity, VisibilityContext, VisibilityPolicy};
