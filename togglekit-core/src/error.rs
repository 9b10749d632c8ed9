// Error types for toggle configuration and resolution

use crate::ToggleId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    #[error(
        "The toggle named {0} has not been configured. Configure the toggle either with a declaration, or by explicitly configuring the toggle."
    )]
    NotConfigured(ToggleId),

    #[error("The toggle identity cannot be empty")]
    IdentityRequired,

    #[error("Toggle source '{origin}' failed to enumerate toggles: {reason}")]
    Discovery { origin: String, reason: String },

    #[error("The global toggle registry has already been initialized")]
    AlreadyInstalled,
}

impl ToggleError {
    /// Build a discovery failure for the named source.
    pub fn discovery(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Discovery {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means a toggle has no usable binding.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}

pub type Result<T> = std::result::Result<T, ToggleError>;
