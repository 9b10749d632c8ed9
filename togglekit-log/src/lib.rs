//! Togglekit Logging
//!
//! Togglekit crates emit structured events through `tracing`. This crate
//! installs a `tracing-subscriber` for hosts that have none, configured from
//! environment variables.
//!
//! # Usage
//!
//! ```rust
//! // Reads TOGGLEKIT_* variables, installs the subscriber once
//! togglekit_log::init();
//!
//! tracing::info!(toggle = "DarkMode", "Toggles configured");
//! ```
//!
//! # Environment Variables
//!
//! - `TOGGLEKIT_DEBUG=1` - Enable debug logging
//! - `TOGGLEKIT_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `TOGGLEKIT_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `TOGGLEKIT_LOG_COLOR=1|0` - Enable/disable colors
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use once_cell::sync::{Lazy, OnceCell};
use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of events to record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    /// Parse a level name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by `EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_filter().to_uppercase())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human readable
    Pretty,
    /// Single line per event
    Compact,
    /// JSON object per event
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub color: bool,
    /// Include the event target (module path)
    pub targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Compact,
            color: false,
            targets: true,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_targets(mut self, targets: bool) -> Self {
        self.targets = targets;
        self
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            lookup(name).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };

        let debug = flag("TOGGLEKIT_DEBUG").unwrap_or(false);

        let level = lookup("TOGGLEKIT_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("TOGGLEKIT_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Compact);

        // Assume color when a terminal is declared and NO_COLOR is not set
        let color = flag("TOGGLEKIT_LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        Self {
            level,
            format,
            color: color && format != Format::Json,
            targets: true,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()))
    }

    /// Build a subscriber for this configuration without installing it
    pub fn subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let registry = tracing_subscriber::registry().with(self.filter());

        match self.format {
            Format::Pretty => Box::new(
                registry.with(
                    fmt::layer()
                        .pretty()
                        .with_ansi(self.color)
                        .with_target(self.targets),
                ),
            ),
            Format::Compact => Box::new(
                registry.with(
                    fmt::layer()
                        .compact()
                        .with_ansi(self.color)
                        .with_target(self.targets),
                ),
            ),
            #[cfg(feature = "json")]
            Format::Json => Box::new(registry.with(fmt::layer().json().with_target(self.targets))),
            #[cfg(not(feature = "json"))]
            Format::Json => Box::new(
                registry.with(fmt::layer().with_ansi(false).with_target(self.targets)),
            ),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// The configuration read from the environment on first use
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Build the environment-configured subscriber without installing it
pub fn subscriber() -> Box<dyn tracing::Subscriber + Send + Sync> {
    config().subscriber()
}

/// Install the environment-configured subscriber as the global default.
///
/// Only the first call has an effect. Returns `false` when another global
/// subscriber was already set by the host.
pub fn init() -> bool {
    *INSTALLED.get_or_init(|| tracing::subscriber::set_global_default(subscriber()).is_ok())
}

// ============================================================================
// Tests
// ============================================================================
