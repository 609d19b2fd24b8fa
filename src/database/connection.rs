use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::storage::PgStorage;

/// Owns the PostgreSQL pool used by [`PgStorage`]
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "database pool connected"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool, e.g. one provided by `#[sqlx::test]`
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn storage(&self) -> PgStorage {
        PgStorage::new(self.pool.clone())
    }

    pub async fn health_check(&self) -> Result<bool> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
