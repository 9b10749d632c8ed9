//! Fluent toggle configuration
//!
//! Each stage returns a distinct type whose only methods are the legal next
//! steps, so an out-of-order chain does not compile:
//!
//! ```
//! use togglekit_core::{MemorySettings, Registry, StaticSource};
//!
//! let registry = Registry::builder()
//!     .source(StaticSource::new("app").toggle("search").toggle("export").toggle("beta"))
//!     .settings(MemorySettings::new().with("beta_enabled", "true"))
//!     .build();
//!
//! registry.select("search").always_true()?;
//! registry.select("export").configured().with_predicate(|| false)?;
//! registry
//!     .select("beta")
//!     .configured()
//!     .with_setting()
//!     .named("beta_enabled")?
//!     .default(false)?;
//!
//! assert!(registry.resolve(&"beta".into())?);
//! # Ok::<(), togglekit_core::ToggleError>(())
//! ```

use crate::{Registry, Result, Strategy, Toggle, ToggleError, ToggleId};

impl Registry {
    /// Start configuring a toggle.
    ///
    /// A blank identity produces a selection without identity; every
    /// terminal operation on it fails with [`ToggleError::IdentityRequired`].
    pub fn select(&self, id: impl Into<ToggleId>) -> Selection<'_> {
        let id = id.into();
        Selection {
            registry: self,
            id: (!id.name().trim().is_empty()).then_some(id),
        }
    }

    /// Start configuring a declared toggle type
    pub fn configure<T: Toggle>(&self) -> Selection<'_> {
        self.select(T::id())
    }

    /// Start configuring a toggle by name.
    ///
    /// A blank name produces a selection without identity; every terminal
    /// operation on it fails with [`ToggleError::IdentityRequired`].
    pub fn select_named(&self, name: &str) -> Selection<'_> {
        self.select(ToggleId::new(name.trim().to_owned()))
    }
}

/// A toggle picked for configuration
#[derive(Debug, Clone)]
pub struct Selection<'r> {
    registry: &'r Registry,
    id: Option<ToggleId>,
}

impl<'r> Selection<'r> {
    /// The selected identity
    pub fn id(&self) -> Option<&ToggleId> {
        self.id.as_ref()
    }

    fn require_id(&self) -> Result<&ToggleId> {
        self.id.as_ref().ok_or(ToggleError::IdentityRequired)
    }

    /// The toggle is always enabled
    pub fn always_true(self) -> Result<()> {
        self.registry.bind(self.require_id()?, Strategy::always_true())
    }

    /// The toggle is always disabled
    pub fn always_false(self) -> Result<()> {
        self.registry.bind(self.require_id()?, Strategy::always_false())
    }

    /// The toggle is driven by an outside source
    pub fn configured(self) -> Configured<'r> {
        Configured {
            registry: self.registry,
            id: self.id,
        }
    }

    /// Evaluate the toggle's current strategy once and keep the result
    pub fn cached(self) -> Result<()> {
        self.registry.freeze(self.require_id()?)
    }
}

/// A toggle that will be driven by a setting or a predicate
#[derive(Debug, Clone)]
pub struct Configured<'r> {
    registry: &'r Registry,
    id: Option<ToggleId>,
}

impl<'r> Configured<'r> {
    /// Read the toggle from the registry's settings source
    pub fn with_setting(self) -> SettingBinding<'r> {
        SettingBinding {
            registry: self.registry,
            id: self.id,
        }
    }

    /// Evaluate the toggle with a caller-supplied predicate
    pub fn with_predicate<F>(self, predicate: F) -> Result<()>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        let id = self.id.as_ref().ok_or(ToggleError::IdentityRequired)?;
        self.registry.bind(id, Strategy::custom(predicate))
    }
}

/// A setting-backed toggle waiting for its key
#[derive(Debug, Clone)]
pub struct SettingBinding<'r> {
    registry: &'r Registry,
    id: Option<ToggleId>,
}

impl<'r> SettingBinding<'r> {
    /// Bind the toggle to `key`. When the setting is absent the toggle is
    /// enabled unless refined with [`NamedSetting::default`].
    pub fn named(self, key: impl Into<String>) -> Result<NamedSetting<'r>> {
        let id = self.id.ok_or(ToggleError::IdentityRequired)?;
        let key = key.into();

        self.registry.bind(&id, Strategy::setting(key.clone(), true))?;
        Ok(NamedSetting {
            registry: self.registry,
            id,
            key,
        })
    }
}

/// A bound setting-backed toggle whose default can still be refined
#[derive(Debug, Clone)]
pub struct NamedSetting<'r> {
    registry: &'r Registry,
    id: ToggleId,
    key: String,
}

impl NamedSetting<'_> {
    pub fn id(&self) -> &ToggleId {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value used when the setting is absent. Rebinds with the same key.
    pub fn default(self, value: bool) -> Result<()> {
        self.registry
            .bind(&self.id, Strategy::setting(self.key, value))
    }
}
