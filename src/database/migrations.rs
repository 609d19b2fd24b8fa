//! # Database Migrations
//!
//! Schema migrations embedded from the `migrations/` directory and applied with
//! the sqlx migrator, which records applied versions in `_sqlx_migrations`.

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use crate::error::{Result, StorefrontError};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies the storefront schema migrations
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Run every migration not yet applied
    pub async fn run_all(pool: &PgPool) -> Result<()> {
        MIGRATOR
            .run(pool)
            .await
            .map_err(|e| StorefrontError::StorageUnavailable(format!("migration failed: {e}")))?;
        tracing::info!(
            migrations = MIGRATOR.iter().count(),
            "storefront schema is up to date"
        );
        Ok(())
    }
}
