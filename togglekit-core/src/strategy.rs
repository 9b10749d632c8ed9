//! Evaluation strategies
//!
//! Defines how a toggle's boolean value is computed.

use crate::settings::SettingsSource;
use std::fmt;
use std::sync::Arc;

/// Type alias for caller-supplied toggle predicates
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// The setting value that enables a setting-backed toggle.
///
/// Matching is exact and case-sensitive: `"True"`, `"1"` or `"yes"` all
/// evaluate to `false`.
pub const ENABLED_TOKEN: &str = "true";

/// Rule bound to a toggle that produces its current value
#[derive(Clone)]
pub enum Strategy {
    /// Always the given value
    Constant(bool),

    /// Read `key` from the settings source, `default` when absent
    Setting { key: String, default: bool },

    /// Caller-supplied predicate
    Custom(Predicate),

    /// Result of a previous evaluation, frozen in place
    Cached(bool),
}

impl Strategy {
    pub fn always_true() -> Self {
        Self::Constant(true)
    }

    pub fn always_false() -> Self {
        Self::Constant(false)
    }

    pub fn setting(key: impl Into<String>, default: bool) -> Self {
        Self::Setting {
            key: key.into(),
            default,
        }
    }

    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluate the strategy.
    ///
    /// Only [`Strategy::Setting`] touches `settings`; a missing key is not an
    /// error and yields the configured default.
    pub fn evaluate(&self, settings: &dyn SettingsSource) -> bool {
        match self {
            Self::Constant(value) | Self::Cached(value) => *value,
            Self::Setting { key, default } => match settings.lookup(key) {
                Some(value) => value == ENABLED_TOKEN,
                None => *default,
            },
            Self::Custom(predicate) => predicate(),
        }
    }

    /// Evaluate once and return the frozen equivalent.
    pub fn freeze(&self, settings: &dyn SettingsSource) -> Self {
        Self::Cached(self.evaluate(settings))
    }

    /// Short name of the strategy kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Setting { .. } => "setting",
            Self::Custom(_) => "custom",
            Self::Cached(_) => "cached",
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }

    /// Whether `other` is the same binding as `self`.
    ///
    /// Predicates compare by identity, every other kind by value.
    pub fn same_binding(&self, other: &Strategy) -> bool {
        match (self, other) {
            (Self::Constant(a), Self::Constant(b)) | (Self::Cached(a), Self::Cached(b)) => a == b,
            (
                Self::Setting { key, default },
                Self::Setting {
                    key: other_key,
                    default: other_default,
                },
            ) => key == other_key && default == other_default,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Setting { key, default } => f
                .debug_struct("Setting")
                .field("key", key)
                .field("default", default)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(<predicate>)"),
            Self::Cached(value) => f.debug_tuple("Cached").field(value).finish(),
        }
    }
}
