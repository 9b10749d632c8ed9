// Togglekit - Feature toggles for Rust
//
// Toggles are declared with `toggle!`, discovered on first use, configured
// with a fluent grammar and evaluated against pluggable settings sources.

// Re-export core functionality
pub use togglekit_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use togglekit_config as config;

#[cfg(feature = "log")]
pub use togglekit_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Feature,
        MemorySettings,
        Registry,
        SettingsSource,
        Strategy,
        Toggle,
        ToggleError,
        ToggleHandle,
        ToggleId,
        toggle,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{ConfigManager, SettingsBuilder};
}
