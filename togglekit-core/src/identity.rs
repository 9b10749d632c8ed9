//! Toggle identities.
//!
//! A toggle is identified by a name. Declared toggles are unit marker types
//! and take their fully qualified type name as identity, so two toggles in
//! different modules never collide.

use std::borrow::Cow;
use std::fmt;

/// Identifier of a single feature toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToggleId(Cow<'static, str>);

impl ToggleId {
    /// Create an identity from any name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Create an identity from a static name without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Identity of a declared toggle type.
    pub fn of<T: Toggle>() -> Self {
        T::id()
    }

    /// Full name of the toggle
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Last path segment of the name (`app::toggles::DarkMode` -> `DarkMode`).
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ToggleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ToggleId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ToggleId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Marker trait for a declared feature toggle.
///
/// Usually implemented through the [`toggle!`](crate::toggle) macro, which
/// also registers the type for discovery.
pub trait Toggle: Send + Sync + 'static {
    /// Identity of this toggle
    fn id() -> ToggleId
    where
        Self: Sized,
    {
        ToggleId::from_static(std::any::type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct SearchV2;
    impl Toggle for SearchV2 {}

    #[test]
    fn test_id_of_type_uses_type_name() {
        let id = ToggleId::of::<SearchV2>();
        assert!(id.name().ends_with("identity::tests::SearchV2"));
        assert_eq!(id.short_name(), "SearchV2");
    }

    #[test]
    fn test_static_and_owned_names_are_equal() {
        let a = ToggleId::from_static("checkout");
        let b = ToggleId::new(String::from("checkout"));
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_short_name_without_path() {
        assert_eq!(ToggleId::from("plain").short_name(), "plain");
    }

    #[test]
    fn test_display() {
        assert_eq!(ToggleId::from("a::b").to_string(), "a::b");
    }
}
