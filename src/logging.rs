//! # Structured Logging Module
//!
//! Console logging through `tracing-subscriber`, with structured event helpers
//! for query and database operations.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process. `RUST_LOG` takes precedence
/// over the configured level.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let console = if config.json {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(filter)
                .boxed()
        };

        // A subscriber installed by the embedding application wins
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }

        tracing::info!(
            level = %config.level,
            json = config.json,
            "structured logging initialized"
        );
    });
}

/// Log one criteria query served by the query service
pub fn log_query_operation(
    operation: &str,
    entity: &str,
    visibility: &str,
    status: &str,
    duration_ms: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        entity = %entity,
        visibility = %visibility,
        status = %status,
        duration_ms = duration_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "QUERY_OPERATION"
    );
}

/// Log structured data for database operations
pub fn log_database_operation(
    operation: &str,
    table: Option<&str>,
    record_id: Option<i64>,
    status: &str,
    duration_ms: Option<u64>,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        table = table,
        record_id = record_id,
        status = %status,
        duration_ms = duration_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "DATABASE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
