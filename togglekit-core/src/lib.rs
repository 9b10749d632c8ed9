//! Feature Toggles for Togglekit
//!
//! A registry of declared feature toggles, each bound to exactly one
//! boolean evaluation strategy, with a fluent configuration grammar and
//! conditional execution built on top.
//!
//! # Features
//!
//! - **Declared toggles** - `toggle!` registers a toggle type at link time
//! - **Strategies** - constant, setting-backed, predicate, frozen
//! - **Fluent configuration** - `select -> configured -> with_setting -> named`
//! - **Conditional execution** - sync and async branches, only one ever runs
//! - **No silent defaults** - querying an unconfigured toggle is an error
//!
//! # Quick Start
//!
//! ```
//! use togglekit_core::*;
//!
//! toggle!(pub NewCheckout);
//! toggle!(pub DarkMode => always_true);
//! toggle!(pub BetaSearch => setting("beta_search", default = false));
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::builder()
//!         .declared()
//!         .settings(MemorySettings::new().with("beta_search", "true"))
//!         .build();
//!
//!     // Unconfigured toggles are an error until bound
//!     assert!(registry.is_enabled::<NewCheckout>().is_err());
//!     registry.configure::<NewCheckout>().always_false()?;
//!
//!     assert!(registry.is_enabled::<DarkMode>()?);
//!     assert!(registry.is_enabled::<BetaSearch>()?);
//!
//!     let page = registry
//!         .toggle::<NewCheckout>()
//!         .execute(|| "new checkout", || "old checkout")?;
//!     assert_eq!(page, "old checkout");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```
//! use togglekit_core::*;
//!
//! let registry = Registry::builder()
//!     .source(StaticSource::new("app").toggle("export").toggle("reports"))
//!     .build();
//!
//! registry.select("export").configured().with_setting().named("export_enabled")?;
//! registry.select("reports").configured().with_predicate(|| true)?;
//!
//! // Evaluate once, keep the result
//! registry.select("reports").cached()?;
//! # Ok::<(), ToggleError>(())
//! ```

pub mod configure;
pub mod discovery;
pub mod error;
pub mod facade;
pub mod global;
pub mod identity;
pub mod registry;
pub mod settings;
pub mod strategy;

pub use configure::{Configured, NamedSetting, Selection, SettingBinding};
pub use discovery::{
    Declared, InventorySource, StaticSource, ToggleDeclaration, ToggleRegistration, ToggleSource,
};
pub use error::{Result, ToggleError};
pub use facade::ToggleHandle;
pub use global::Feature;
pub use identity::{Toggle, ToggleId};
pub use registry::{Registry, RegistryBuilder};
pub use settings::{EnvSettings, MemorySettings, NoSettings, SettingsSource};
pub use strategy::{Predicate, Strategy};

#[doc(hidden)]
pub use inventory;
