//! Conditional execution on top of the registry

use crate::{Registry, Result, Toggle, ToggleId};
use std::future::Future;

impl Registry {
    /// Handle for a declared toggle type
    pub fn toggle<T: Toggle>(&self) -> ToggleHandle<'_> {
        self.handle(T::id())
    }

    /// Handle for any toggle identity
    pub fn handle(&self, id: impl Into<ToggleId>) -> ToggleHandle<'_> {
        ToggleHandle {
            registry: self,
            id: id.into(),
        }
    }
}

/// Entry point for querying one toggle and branching on it.
///
/// Every operation propagates [`ToggleError::NotConfigured`](crate::ToggleError)
/// before running either branch.
#[derive(Debug, Clone)]
pub struct ToggleHandle<'r> {
    registry: &'r Registry,
    id: ToggleId,
}

impl ToggleHandle<'_> {
    pub fn id(&self) -> &ToggleId {
        &self.id
    }

    pub fn is_enabled(&self) -> Result<bool> {
        self.registry.resolve(&self.id)
    }

    /// Run exactly one of the two branches and return its value
    pub fn execute<R>(
        &self,
        on_enabled: impl FnOnce() -> R,
        on_disabled: impl FnOnce() -> R,
    ) -> Result<R> {
        Ok(if self.is_enabled()? {
            on_enabled()
        } else {
            on_disabled()
        })
    }

    /// Run exactly one of two side-effecting branches
    pub fn run(&self, on_enabled: impl FnOnce(), on_disabled: impl FnOnce()) -> Result<()> {
        self.execute(on_enabled, on_disabled)
    }

    /// Await exactly one of the two asynchronous branches.
    ///
    /// The branch not chosen is never called, so its future is never created.
    pub async fn execute_async<R, E, D, EF, DF>(&self, on_enabled: E, on_disabled: D) -> Result<R>
    where
        E: FnOnce() -> EF,
        D: FnOnce() -> DF,
        EF: Future<Output = R>,
        DF: Future<Output = R>,
    {
        Ok(if self.is_enabled()? {
            on_enabled().await
        } else {
            on_disabled().await
        })
    }

    /// Await exactly one of two side-effecting asynchronous branches
    pub async fn run_async<E, D, EF, DF>(&self, on_enabled: E, on_disabled: D) -> Result<()>
    where
        E: FnOnce() -> EF,
        D: FnOnce() -> DF,
        EF: Future<Output = ()>,
        DF: Future<Output = ()>,
    {
        self.execute_async(on_enabled, on_disabled).await
    }
}
