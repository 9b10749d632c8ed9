//! Settings sources
//!
//! The read contract the registry needs from external configuration: look a
//! key up, get its string value back or nothing. Absence is distinct from a
//! value of `"false"`.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Read-only key/value settings lookup
pub trait SettingsSource: Send + Sync {
    /// Look up a setting by key
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: SettingsSource + ?Sized> SettingsSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: SettingsSource + ?Sized> SettingsSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl SettingsSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Settings source with no entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsSource for NoSettings {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Mutable in-memory settings.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// change values after handing a clone to a registry.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Remove a value, returning the previous one
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl SettingsSource for MemorySettings {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

impl From<HashMap<String, String>> for MemorySettings {
    fn from(values: HashMap<String, String>) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }
}

/// Settings read from process environment variables.
///
/// With a prefix, key `beta_search` is looked up as `PREFIX_BETA_SEARCH`.
/// Without one the key is tried verbatim first, then upper-cased.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: Option<String>,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn variable_name(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl SettingsSource for EnvSettings {
    fn lookup(&self, key: &str) -> Option<String> {
        if self.prefix.is_none()
            && let Ok(value) = env::var(key)
        {
            return Some(value);
        }
        env::var(self.variable_name(key)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_settings_is_always_absent() {
        assert_eq!(NoSettings.lookup("anything"), None);
    }

    #[test]
    fn test_memory_settings_shared_between_clones() {
        let settings = MemorySettings::new().with("a", "true");
        let shared = settings.clone();

        settings.set("a", "false");
        assert_eq!(shared.lookup("a").as_deref(), Some("false"));

        assert_eq!(settings.remove("a").as_deref(), Some("false"));
        assert!(shared.is_empty());
    }

    #[test]
    fn test_hashmap_source() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), "v".to_string());

        assert_eq!(map.lookup("k").as_deref(), Some("v"));
        assert_eq!(map.lookup("missing"), None);
    }

    #[test]
    fn test_arc_dyn_source() {
        let source: Arc<dyn SettingsSource> = Arc::new(MemorySettings::new().with("x", "1"));
        assert_eq!(source.lookup("x").as_deref(), Some("1"));
    }

    #[test]
    fn test_env_variable_name() {
        let settings = EnvSettings::with_prefix("APP");
        assert_eq!(settings.variable_name("beta_search"), "APP_BETA_SEARCH");
        assert_eq!(EnvSettings::new().variable_name("beta"), "BETA");
    }

    #[test]
    fn test_env_missing_variable() {
        let settings = EnvSettings::with_prefix("TOGGLEKIT_TEST_NONEXISTENT");
        assert_eq!(settings.lookup("VAR_98765"), None);
    }

    #[test]
    fn test_env_path_exists() {
        // PATH is almost always set on any system
        if std::env::var("PATH").is_ok() {
            assert!(EnvSettings::new().lookup("PATH").is_some());
        }
    }
}
