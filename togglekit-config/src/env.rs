// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Loads settings from process environment variables.
///
/// With a prefix only `PREFIX_*` variables are read and the prefix is
/// stripped, so `APP_BETA_SEARCH=true` becomes the setting `beta_search`.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Setting key for an environment variable name, if it belongs to this loader
    pub fn key_for(&self, variable: &str) -> Option<String> {
        match self.prefix {
            Some(ref prefix) => variable
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty())
                .map(str::to_lowercase),
            None => Some(variable.to_lowercase()),
        }
    }

    /// Environment variable name for a setting key
    pub fn variable_for(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Load every matching environment variable
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(env::vars()
            .filter_map(|(variable, value)| self.key_for(&variable).map(|key| (key, value)))
            .collect())
    }

    /// Load a single setting
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.variable_for(key)).map_err(ConfigError::EnvError)
    }

    /// Load a single setting with a fallback
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}
