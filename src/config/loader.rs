//! Configuration Loader
//!
//! Environment-aware layering of defaults, config files and environment
//! variables on top of the `config` crate.

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::StorefrontConfig;
use crate::error::Result;

const ENV_PREFIX: &str = "STOREFRONT";
const BASE_NAME: &str = "storefront";

/// Current environment name: `STOREFRONT_ENV`, then `APP_ENV`, else `development`
pub fn detect_environment() -> String {
    env::var("STOREFRONT_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Builder for a validated [`StorefrontConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
    explicit_file: Option<PathBuf>,
    /// Replaces the process environment; keeps tests off global state
    env_source: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            environment: detect_environment(),
            explicit_file: None,
            env_source: None,
        }
    }

    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Load this file instead of the directory lookup; it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn load(&self) -> Result<StorefrontConfig> {
        debug!(
            environment = %self.environment,
            config_dir = %self.config_dir.display(),
            "loading storefront configuration"
        );

        let mut builder =
            Config::builder().add_source(Config::try_from(&StorefrontConfig::default())?);

        match &self.explicit_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                builder = builder
                    .add_source(File::from(self.config_dir.join(BASE_NAME)).required(false))
                    .add_source(
                        File::from(self.environment_file(&self.config_dir)).required(false),
                    );
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(self.env_source.clone());
        builder = builder.add_source(environment);

        if let Some(url) = self.lookup_var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        let config: StorefrontConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            max_connections = config.database.max_connections,
            default_page_size = config.pagination.default_page_size,
            max_page_size = config.pagination.max_page_size,
            "configuration loaded successfully"
        );
        Ok(config)
    }

    fn environment_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{BASE_NAME}.{}", self.environment))
    }

    fn lookup_var(&self, name: &str) -> Option<String> {
        match &self.env_source {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }
}
