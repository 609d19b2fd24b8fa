//! # Database Operations
//!
//! PostgreSQL connection management and schema migrations for [`PgStorage`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use storefront_query::config::DatabaseConfig;
//! use storefront_query::database::{DatabaseConnection, DatabaseMigrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::connect(&DatabaseConfig::default()).await?;
//! DatabaseMigrations::run_all(db.pool()).await?;
//! let storage = db.storage();
//! # Ok(())
//! # }
//! ```
//!
//! [`PgStorage`]: crate::storage::PgStorage

pub mod connection;
pub mod migrations;

pub use connection::DatabaseConnection;
pub use migrations::DatabaseMigrations;
