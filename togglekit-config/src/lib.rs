//! Settings sources for Togglekit
//!
//! [`ConfigManager`] is a key/value store loaded from environment variables,
//! `.env` files and JSON / TOML / env files. It implements
//! [`SettingsSource`], so setting-backed toggles can read from it:
//!
//! ```
//! use togglekit_config::{ConfigManager, FileFormat};
//! use togglekit_core::{Registry, SettingsSource, StaticSource};
//!
//! let settings = ConfigManager::new();
//! settings.load_str("[features]\nbeta = \"true\"\n", FileFormat::Toml)?;
//! assert_eq!(settings.lookup("features.beta").as_deref(), Some("true"));
//!
//! let registry = Registry::builder()
//!     .source(StaticSource::new("app").toggle("beta"))
//!     .settings(settings)
//!     .build();
//! registry.select("beta").configured().with_setting().named("features.beta")?;
//! assert!(registry.resolve(&"beta".into())?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod env;
pub mod error;
pub mod loader;

pub use builder::SettingsBuilder;
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use togglekit_core::SettingsSource;
use tracing::debug;

/// Shared key/value settings store
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    fn insert_all(&self, values: impl IntoIterator<Item = (String, Value)>) -> usize {
        let mut config = self.config.write();
        let mut count = 0;
        for (key, value) in values {
            config.insert(key, value);
            count += 1;
        }
        count
    }

    /// Load settings from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let vars = loader.load()?;

        let count = self.insert_all(vars.into_iter().map(|(k, v)| (k, Value::String(v))));
        debug!(count, prefix = ?self.env_prefix, "Loaded settings from environment");
        Ok(())
    }

    /// Load a `.env` file into the process environment, then read the
    /// environment.
    ///
    /// Without a path, `.env` is searched from the current directory
    /// upwards and a missing file is not an error. A file that exists but
    /// cannot be read or parsed always is.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
                Err(e) if e.not_found() => debug!("No .env file found"),
                Err(e) => return Err(ConfigError::LoadError(format!("Failed to load .env: {}", e))),
            },
        }
        self.load_env()
    }

    /// Load settings from a file in the given format
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let values = ConfigLoader::new(format).load_file(path)?;

        let count = self.insert_all(values);
        debug!(count, path = %path.display(), "Loaded settings file");
        Ok(())
    }

    /// Load settings from a file, detecting the format from its name
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.load_file(path, ConfigLoader::auto(path)?.format())
    }

    /// Load settings from a string
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let values = ConfigLoader::new(format).parse(content)?;
        self.insert_all(values);
        Ok(())
    }

    /// Set a value
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a value, returning whether it existed
    pub fn remove(&self, key: &str) -> bool {
        self.config.write().remove(key).is_some()
    }

    /// Get a typed value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .config
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Get a typed value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get the raw string form of a value, as seen by toggles.
    ///
    /// Strings are returned verbatim, other scalars by their JSON text and
    /// `null` is treated as absent.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.config.read().get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.config.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Merge values from another manager, overwriting existing keys
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.config, &other.config) {
            return;
        }
        let values: Vec<(String, Value)> = other
            .config
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.insert_all(values);
    }
}

impl SettingsSource for ConfigManager {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get_raw(key)
    }
}
