//! Toggle discovery
//!
//! Toggles are declared with the [`toggle!`](crate::toggle) macro, which
//! submits a [`ToggleRegistration`] to `inventory` at link time. The registry
//! asks each configured [`ToggleSource`] for its declarations once, on first
//! use.

use crate::{Result, Strategy, ToggleId};

/// Strategy attached to a toggle where it is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    /// No strategy; the toggle must be configured explicitly
    Unconfigured,
    AlwaysTrue,
    AlwaysFalse,
    /// Read from the named setting, `default` when the setting is absent
    Setting { key: &'static str, default: bool },
}

impl Declared {
    /// Strategy to install at discovery time, if any
    pub fn strategy(&self) -> Option<Strategy> {
        match *self {
            Declared::Unconfigured => None,
            Declared::AlwaysTrue => Some(Strategy::always_true()),
            Declared::AlwaysFalse => Some(Strategy::always_false()),
            Declared::Setting { key, default } => Some(Strategy::setting(key, default)),
        }
    }
}

/// A toggle registration that can be collected via inventory
pub struct ToggleRegistration {
    id: fn() -> ToggleId,
    declared: Declared,
}

// Register ToggleRegistration with inventory for link-time collection
inventory::collect!(ToggleRegistration);

impl ToggleRegistration {
    pub const fn new(id: fn() -> ToggleId, declared: Declared) -> Self {
        Self { id, declared }
    }

    pub fn id(&self) -> ToggleId {
        (self.id)()
    }

    pub fn declared(&self) -> Declared {
        self.declared
    }

    /// Convert into a runtime declaration
    pub fn declaration(&self) -> ToggleDeclaration {
        ToggleDeclaration {
            id: self.id(),
            strategy: self.declared.strategy(),
        }
    }
}

/// A discovered toggle identity with its optional declared strategy
#[derive(Debug, Clone)]
pub struct ToggleDeclaration {
    pub id: ToggleId,
    pub strategy: Option<Strategy>,
}

impl ToggleDeclaration {
    /// Declaration without a strategy
    pub fn new(id: impl Into<ToggleId>) -> Self {
        Self {
            id: id.into(),
            strategy: None,
        }
    }

    /// Attach a declared strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Anything that can enumerate toggle identities for the registry.
///
/// A source that fails contributes no identities; the other sources are
/// still discovered.
///
/// `declarations` runs inside the registry's one-time discovery. It must not
/// call back into the registry it is being discovered by: that re-enters
/// discovery and deadlocks.
pub trait ToggleSource: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Enumerate the toggles this source knows about
    fn declarations(&self) -> Result<Vec<ToggleDeclaration>>;
}

/// Source yielding every toggle declared with [`toggle!`](crate::toggle)
/// in the running binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventorySource;

impl ToggleSource for InventorySource {
    fn name(&self) -> &str {
        "inventory"
    }

    fn declarations(&self) -> Result<Vec<ToggleDeclaration>> {
        Ok(inventory::iter::<ToggleRegistration>
            .into_iter()
            .map(ToggleRegistration::declaration)
            .collect())
    }
}

/// Source backed by an explicit list of declarations
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    declarations: Vec<ToggleDeclaration>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// Add an unconfigured toggle
    pub fn toggle(mut self, id: impl Into<ToggleId>) -> Self {
        self.declarations.push(ToggleDeclaration::new(id));
        self
    }

    /// Add a toggle with a declared strategy
    pub fn declared(mut self, id: impl Into<ToggleId>, strategy: Strategy) -> Self {
        self.declarations
            .push(ToggleDeclaration::new(id).with_strategy(strategy));
        self
    }

    /// Add a declared toggle type
    pub fn typed<T: crate::Toggle>(self) -> Self {
        self.toggle(T::id())
    }
}

impl ToggleSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn declarations(&self) -> Result<Vec<ToggleDeclaration>> {
        Ok(self.declarations.clone())
    }
}

/// Declare a feature toggle and register it for discovery.
///
/// Expands to a unit marker struct implementing [`Toggle`](crate::Toggle)
/// plus an `inventory` submission, so the registry finds the toggle without
/// any manual wiring.
///
/// ```
/// togglekit_core::toggle!(pub NewCheckout);
/// togglekit_core::toggle!(pub DarkMode => always_true);
/// togglekit_core::toggle!(pub LegacyExport => always_false);
/// togglekit_core::toggle!(pub BetaSearch => setting("beta_search"));
/// togglekit_core::toggle!(pub Telemetry => setting("telemetry", default = false));
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! toggle {
    (@declare [$($attr:tt)*] $vis:vis $name:ident, $declared:expr) => {
        $($attr)*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Toggle for $name {}

        $crate::inventory::submit! {
            $crate::ToggleRegistration::new(<$name as $crate::Toggle>::id, $declared)
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident => always_true) => {
        $crate::toggle!(@declare [$(#[$meta])*] $vis $name, $crate::Declared::AlwaysTrue);
    };
    ($(#[$meta:meta])* $vis:vis $name:ident => always_false) => {
        $crate::toggle!(@declare [$(#[$meta])*] $vis $name, $crate::Declared::AlwaysFalse);
    };
    ($(#[$meta:meta])* $vis:vis $name:ident => setting($key:expr, default = $default:expr)) => {
        $crate::toggle!(
            @declare [$(#[$meta])*] $vis $name,
            $crate::Declared::Setting { key: $key, default: $default }
        );
    };
    ($(#[$meta:meta])* $vis:vis $name:ident => setting($key:expr)) => {
        $crate::toggle!(
            @declare [$(#[$meta])*] $vis $name,
            $crate::Declared::Setting { key: $key, default: true }
        );
    };
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $crate::toggle!(@declare [$(#[$meta])*] $vis $name, $crate::Declared::Unconfigured);
    };
}
