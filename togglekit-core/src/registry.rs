//! Toggle registry
//!
//! Holds one entry per discovered toggle identity and the strategy bound to
//! it. Discovery runs lazily, exactly once, the first time any registry
//! operation touches the entries.

use crate::discovery::{InventorySource, ToggleSource};
use crate::settings::{NoSettings, SettingsSource};
use crate::{Result, Strategy, Toggle, ToggleError, ToggleId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default)]
struct Entry {
    /// Binding installed at discovery, restored by `reset`
    declared: Option<Strategy>,
    /// Current binding; `None` means unconfigured
    strategy: Option<Strategy>,
}

/// The feature toggle registry
pub struct Registry {
    sources: Vec<Box<dyn ToggleSource>>,
    settings: Arc<dyn SettingsSource>,
    entries: OnceLock<RwLock<HashMap<ToggleId, Entry>>>,
}

impl Registry {
    /// Registry discovering `toggle!` declarations, with no settings source
    pub fn new() -> Self {
        Self::builder().declared().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The settings source strategies are evaluated against
    pub fn settings(&self) -> &dyn SettingsSource {
        self.settings.as_ref()
    }

    fn entries(&self) -> &RwLock<HashMap<ToggleId, Entry>> {
        self.entries.get_or_init(|| RwLock::new(self.discover()))
    }

    fn discover(&self) -> HashMap<ToggleId, Entry> {
        debug!(sources = self.sources.len(), "Discovering feature toggles");
        let mut entries: HashMap<ToggleId, Entry> = HashMap::new();

        for source in &self.sources {
            let declarations = match source.declarations() {
                Ok(declarations) => declarations,
                Err(error) => {
                    warn!(
                        source = source.name(),
                        error = %error,
                        "Toggle source failed, it contributes no toggles"
                    );
                    continue;
                }
            };

            trace!(
                source = source.name(),
                count = declarations.len(),
                "Collected toggle declarations"
            );

            for declaration in declarations {
                let entry = entries.entry(declaration.id.clone()).or_default();
                let Some(strategy) = declaration.strategy else {
                    continue;
                };

                if entry.declared.is_some() {
                    warn!(
                        toggle = %declaration.id,
                        source = source.name(),
                        "Toggle declared with more than one strategy, keeping the first"
                    );
                    continue;
                }

                entry.declared = Some(strategy.clone());
                entry.strategy = Some(strategy);
            }
        }

        debug!(
            toggles = entries.len(),
            configured = entries.values().filter(|e| e.strategy.is_some()).count(),
            "Feature toggle discovery complete"
        );
        entries
    }

    /// Number of discovered toggles
    pub fn len(&self) -> usize {
        self.entries().read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().read().is_empty()
    }

    /// All discovered identities, sorted by name
    pub fn identities(&self) -> Vec<ToggleId> {
        let mut ids: Vec<ToggleId> = self.entries().read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Whether the identity was discovered
    pub fn contains(&self, id: &ToggleId) -> bool {
        self.entries().read().contains_key(id)
    }

    /// Whether the identity has a strategy bound
    pub fn is_configured(&self, id: &ToggleId) -> bool {
        self.entries()
            .read()
            .get(id)
            .is_some_and(|entry| entry.strategy.is_some())
    }

    /// Current binding of a toggle, if any
    pub fn strategy(&self, id: &ToggleId) -> Option<Strategy> {
        self.entries()
            .read()
            .get(id)
            .and_then(|entry| entry.strategy.clone())
    }

    /// Bind or replace the strategy of a discovered toggle.
    ///
    /// Fails with [`ToggleError::NotConfigured`] when the identity is unknown.
    pub fn bind(&self, id: &ToggleId, strategy: Strategy) -> Result<()> {
        let mut entries = self.entries().write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ToggleError::NotConfigured(id.clone()))?;

        debug!(toggle = %id, strategy = strategy.kind(), "Toggle bound");
        entry.strategy = Some(strategy);
        Ok(())
    }

    fn current(&self, id: &ToggleId) -> Result<Strategy> {
        let strategy = self
            .entries()
            .read()
            .get(id)
            .and_then(|entry| entry.strategy.clone());

        strategy.ok_or_else(|| {
            debug!(toggle = %id, "Toggle queried before being configured");
            ToggleError::NotConfigured(id.clone())
        })
    }

    /// Evaluate the strategy bound to a toggle.
    ///
    /// An unconfigured toggle is an error, never a default value. The
    /// strategy runs outside the registry lock.
    pub fn resolve(&self, id: &ToggleId) -> Result<bool> {
        let strategy = self.current(id)?;
        let enabled = strategy.evaluate(self.settings());

        trace!(toggle = %id, strategy = strategy.kind(), enabled, "Toggle resolved");
        Ok(enabled)
    }

    /// Evaluate the current strategy once and bind the frozen result.
    ///
    /// A bind that lands while the strategy is being evaluated wins; the
    /// frozen value is then discarded.
    pub fn freeze(&self, id: &ToggleId) -> Result<()> {
        let evaluated = self.current(id)?;
        let frozen = evaluated.freeze(self.settings());

        let mut entries = self.entries().write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ToggleError::NotConfigured(id.clone()))?;

        match &entry.strategy {
            Some(current) if current.same_binding(&evaluated) => {
                debug!(toggle = %id, strategy = ?frozen, "Toggle frozen");
                entry.strategy = Some(frozen);
                Ok(())
            }
            Some(current) => {
                debug!(
                    toggle = %id,
                    strategy = current.kind(),
                    "Toggle rebound during freeze, keeping the newer binding"
                );
                Ok(())
            }
            None => Err(ToggleError::NotConfigured(id.clone())),
        }
    }

    /// Return a toggle to the unconfigured state
    pub fn unbind(&self, id: &ToggleId) -> Result<()> {
        let mut entries = self.entries().write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| ToggleError::NotConfigured(id.clone()))?;

        debug!(toggle = %id, "Toggle unbound");
        entry.strategy = None;
        Ok(())
    }

    /// Restore every toggle to the binding it had right after discovery
    pub fn reset(&self) {
        let mut entries = self.entries().write();
        for entry in entries.values_mut() {
            entry.strategy = entry.declared.clone();
        }

        debug!(toggles = entries.len(), "Toggle bindings reset");
    }

    /// Resolve a declared toggle type
    pub fn is_enabled<T: Toggle>(&self) -> Result<bool> {
        self.resolve(&T::id())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("Registry")
            .field("sources", &sources)
            .field("discovered", &self.entries.get().map(|e| e.read().len()))
            .finish()
    }
}

/// Builder for [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    sources: Vec<Box<dyn ToggleSource>>,
    settings: Option<Arc<dyn SettingsSource>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a discovery source
    pub fn source(mut self, source: impl ToggleSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Discover toggles declared with [`toggle!`](crate::toggle)
    pub fn declared(self) -> Self {
        self.source(InventorySource)
    }

    /// Settings source for setting-backed toggles
    pub fn settings(self, settings: impl SettingsSource + 'static) -> Self {
        self.shared_settings(Arc::new(settings))
    }

    /// Settings source shared with other owners
    pub fn shared_settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the registry. Discovery is deferred until first use.
    pub fn build(self) -> Registry {
        Registry {
            sources: self.sources,
            settings: self.settings.unwrap_or_else(|| Arc::new(NoSettings)),
            entries: OnceLock::new(),
        }
    }
}
