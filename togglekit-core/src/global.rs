//! Process-wide registry
//!
//! Hosts that prefer a single shared registry can install one at startup, or
//! let the first access build the default: every `toggle!` declaration in
//! the binary, evaluated against environment variables.

use crate::configure::Selection;
use crate::facade::ToggleHandle;
use crate::settings::EnvSettings;
use crate::{Registry, Result, Toggle, ToggleError};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Fails with [`ToggleError::AlreadyInstalled`] once a registry is in place,
/// including the default one created by an earlier [`registry`] call.
pub fn install(registry: Registry) -> Result<()> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| ToggleError::AlreadyInstalled)?;

    debug!("Global toggle registry installed");
    Ok(())
}

/// The process-wide registry, created with defaults on first use
pub fn registry() -> &'static Registry {
    GLOBAL_REGISTRY.get_or_init(|| {
        debug!("Creating default global toggle registry");
        Registry::builder()
            .declared()
            .settings(EnvSettings::new())
            .build()
    })
}

/// Typed access to a declared toggle through the global registry.
///
/// ```no_run
/// use togglekit_core::{toggle, Feature};
///
/// toggle!(pub NewCheckout);
///
/// fn main() -> togglekit_core::Result<()> {
///     Feature::<NewCheckout>::select().always_true()?;
///
///     let page = Feature::<NewCheckout>::execute(|| "new checkout", || "old checkout")?;
///     assert_eq!(page, "new checkout");
///     Ok(())
/// }
/// ```
pub struct Feature<T: Toggle>(PhantomData<T>);

impl<T: Toggle> Feature<T> {
    /// Start configuring the toggle
    pub fn select() -> Selection<'static> {
        registry().configure::<T>()
    }

    pub fn handle() -> ToggleHandle<'static> {
        registry().toggle::<T>()
    }

    pub fn is_enabled() -> Result<bool> {
        registry().is_enabled::<T>()
    }

    pub fn execute<R>(on_enabled: impl FnOnce() -> R, on_disabled: impl FnOnce() -> R) -> Result<R> {
        Self::handle().execute(on_enabled, on_disabled)
    }

    pub fn run(on_enabled: impl FnOnce(), on_disabled: impl FnOnce()) -> Result<()> {
        Self::handle().run(on_enabled, on_disabled)
    }

    pub async fn execute_async<R, E, D, EF, DF>(on_enabled: E, on_disabled: D) -> Result<R>
    where
        E: FnOnce() -> EF,
        D: FnOnce() -> DF,
        EF: Future<Output = R>,
        DF: Future<Output = R>,
    {
        Self::handle().execute_async(on_enabled, on_disabled).await
    }

    pub async fn run_async<E, D, EF, DF>(on_enabled: E, on_disabled: D) -> Result<()>
    where
        E: FnOnce() -> EF,
        D: FnOnce() -> DF,
        EF: Future<Output = ()>,
        DF: Future<Output = ()>,
    {
        Self::handle().run_async(on_enabled, on_disabled).await
    }
}
