//! Integration tests for common Togglekit workflows.
//!
//! These tests verify that the most common use cases work correctly through
//! the `togglekit` facade crate.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use togglekit::prelude::*;
use togglekit::{StaticSource, ToggleSource};

toggle!(pub NewDashboard);
toggle!(pub AuditTrail => always_true);
toggle!(pub LegacyReports => always_false);
toggle!(pub DarkMode => setting("ui.dark_mode"));
toggle!(pub Maintenance => setting("ops.maintenance", default = false));

fn registry_with(settings: MemorySettings) -> Registry {
    Registry::builder().declared().settings(settings).build()
}

// =============================================================================
// Discovery Tests
// =============================================================================

#[test]
fn test_declared_toggles_are_discovered() {
    let registry = registry_with(MemorySettings::new());

    assert_eq!(registry.len(), 5);
    assert!(registry.contains(&NewDashboard::id()));
    assert!(registry.contains(&ToggleId::of::<Maintenance>()));

    // Declarations without a strategy exist but are not configured
    assert!(!registry.is_configured(&NewDashboard::id()));
    assert!(registry.is_configured(&AuditTrail::id()));
}

#[test]
fn test_unconfigured_toggle_reports_its_name() {
    let registry = registry_with(MemorySettings::new());

    let err = registry.is_enabled::<NewDashboard>().unwrap_err();
    assert!(err.is_not_configured());
    assert!(err.to_string().contains("NewDashboard"));
}

#[test]
fn test_extra_sources_add_to_declarations() {
    let registry = Registry::builder()
        .declared()
        .source(StaticSource::new("plugins").toggle("plugins.export"))
        .build();

    assert_eq!(registry.len(), 6);
    assert!(registry.contains(&"plugins.export".into()));
}

// =============================================================================
// Declared Strategy Tests
// =============================================================================

#[test]
fn test_declared_strategies() {
    let settings = MemorySettings::new().with("ui.dark_mode", "true");
    let registry = registry_with(settings.clone());

    assert_eq!(registry.is_enabled::<AuditTrail>(), Ok(true));
    assert_eq!(registry.is_enabled::<LegacyReports>(), Ok(false));
    assert_eq!(registry.is_enabled::<DarkMode>(), Ok(true));
    assert_eq!(registry.is_enabled::<Maintenance>(), Ok(false));

    // Setting values only enable on the exact token
    settings.set("ui.dark_mode", "True");
    assert_eq!(registry.is_enabled::<DarkMode>(), Ok(false));

    settings.set("ops.maintenance", "true");
    assert_eq!(registry.is_enabled::<Maintenance>(), Ok(true));
}

#[test]
fn test_missing_setting_uses_default() {
    let registry = registry_with(MemorySettings::new());

    // setting("key") defaults to enabled when the key is absent
    assert_eq!(registry.is_enabled::<DarkMode>(), Ok(true));
    assert_eq!(registry.is_enabled::<Maintenance>(), Ok(false));
}

// =============================================================================
// Configuration Grammar Tests
// =============================================================================

#[test]
fn test_configuration_grammar() {
    let settings = MemorySettings::new();
    let registry = registry_with(settings.clone());

    registry.configure::<NewDashboard>().always_true().unwrap();
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(true));

    registry.configure::<NewDashboard>().always_false().unwrap();
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(false));

    registry
        .configure::<NewDashboard>()
        .configured()
        .with_setting()
        .named("dashboard.v2")
        .unwrap()
        .default(false)
        .unwrap();
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(false));
    settings.set("dashboard.v2", "true");
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(true));

    let flag = Arc::new(AtomicBool::new(false));
    let observed = Arc::clone(&flag);
    registry
        .configure::<NewDashboard>()
        .configured()
        .with_predicate(move || observed.load(Ordering::SeqCst))
        .unwrap();
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(false));
    flag.store(true, Ordering::SeqCst);
    assert_eq!(registry.is_enabled::<NewDashboard>(), Ok(true));
}

#[test]
fn test_configuration_overrides_declaration_until_reset() {
    let registry = registry_with(MemorySettings::new());

    registry.configure::<AuditTrail>().always_false().unwrap();
    assert_eq!(registry.is_enabled::<AuditTrail>(), Ok(false));

    registry.reset();
    assert_eq!(registry.is_enabled::<AuditTrail>(), Ok(true));
}

#[test]
fn test_blank_name_requires_identity() {
    let registry = registry_with(MemorySettings::new());

    assert_eq!(
        registry.select_named("  ").always_true(),
        Err(ToggleError::IdentityRequired)
    );
}

// =============================================================================
// Cached Strategy Tests
// =============================================================================

#[test]
fn test_cached_toggle_ignores_later_changes() {
    let settings = MemorySettings::new().with("ui.dark_mode", "false");
    let registry = registry_with(settings.clone());

    registry.configure::<DarkMode>().cached().unwrap();
    settings.set("ui.dark_mode", "true");

    assert_eq!(registry.is_enabled::<DarkMode>(), Ok(false));
    assert!(registry.strategy(&DarkMode::id()).is_some_and(|s| s.is_cached()));
}

#[test]
fn test_cached_unconfigured_toggle_fails() {
    let registry = registry_with(MemorySettings::new());

    let err = registry.configure::<NewDashboard>().cached().unwrap_err();
    assert!(err.is_not_configured());
}

// =============================================================================
// Execution Tests
// =============================================================================

#[test]
fn test_execute_selects_branch() {
    let registry = registry_with(MemorySettings::new());

    let label = registry
        .toggle::<AuditTrail>()
        .execute(|| "audited", || "unaudited")
        .unwrap();
    assert_eq!(label, "audited");

    let ran = Cell::new("none");
    registry
        .toggle::<LegacyReports>()
        .run(|| ran.set("enabled"), || ran.set("disabled"))
        .unwrap();
    assert_eq!(ran.get(), "disabled");
}

#[test]
fn test_execute_unconfigured_runs_nothing() {
    let registry = registry_with(MemorySettings::new());
    let called = Cell::new(false);

    let result = registry
        .toggle::<NewDashboard>()
        .run(|| called.set(true), || called.set(true));

    assert!(result.is_err());
    assert!(!called.get());
}

#[tokio::test]
async fn test_execute_async_selects_branch() {
    let registry = registry_with(MemorySettings::new());

    let value = registry
        .toggle::<AuditTrail>()
        .execute_async(|| async { 1 }, || async { 2 })
        .await
        .unwrap();
    assert_eq!(value, 1);

    let value = registry
        .handle(LegacyReports::id())
        .execute_async(|| async { 1 }, || async { 2 })
        .await
        .unwrap();
    assert_eq!(value, 2);
}

// =============================================================================
// Custom Source Tests
// =============================================================================

#[test]
fn test_static_source_declarations() {
    let source = StaticSource::new("manual")
        .toggle("a")
        .declared("b", Strategy::always_true());

    assert_eq!(source.name(), "manual");
    assert_eq!(source.declarations().unwrap().len(), 2);

    let registry = Registry::builder().source(source).build();
    assert_eq!(registry.resolve(&"b".into()), Ok(true));
    assert!(registry.resolve(&"a".into()).is_err());
}

// =============================================================================
// Config Feature Tests
// =============================================================================

#[cfg(feature = "config")]
mod config_workflows {
    use super::*;
    use std::io::Write;
    use togglekit::config::SettingsBuilder;

    #[test]
    fn test_toml_file_drives_declared_toggles() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[ui]\ndark_mode = \"false\"\n\n[ops]\nmaintenance = true\n")
            .unwrap();

        let settings = SettingsBuilder::new().add_path(file.path()).build().unwrap();
        let registry = Registry::builder().declared().settings(settings).build();

        assert_eq!(registry.is_enabled::<DarkMode>(), Ok(false));
        assert_eq!(registry.is_enabled::<Maintenance>(), Ok(true));
    }
}
