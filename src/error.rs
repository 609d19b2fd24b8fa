use thiserror::Error;

/// Errors surfaced by the criteria, visibility and query layers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorefrontError {
    /// Programmer or request error: unknown field, unknown sort property, bad parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller has no linked customer profile
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure reported by the storage collaborator, propagated as-is
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorefrontError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<sqlx::Error> for StorefrontError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<config::ConfigError> for StorefrontError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_errors_become_storage_unavailable() {
        let err: StorefrontError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_storage_unavailable());
        assert!(err.to_string().starts_with("Storage unavailable:"));
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            StorefrontError::validation("unknown field 'foo'").to_string(),
            "Validation error: unknown field 'foo'"
        );
        assert!(StorefrontError::not_found("no customer").is_not_found());
    }
}
