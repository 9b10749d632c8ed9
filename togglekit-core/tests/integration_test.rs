//! Integration tests for togglekit-core

use togglekit_core::*;

mod billing {
    togglekit_core::toggle!(pub InvoiceV2);
    togglekit_core::toggle!(pub LegacyExport => always_false);
}

mod search {
    togglekit_core::toggle!(pub FuzzySearch => always_true);
    togglekit_core::toggle!(pub BetaRanking => setting("beta_ranking"));
    togglekit_core::toggle!(
        /// Off unless the setting says otherwise
        pub Telemetry => setting("telemetry", default = false)
    );
}

struct BrokenModule;

impl ToggleSource for BrokenModule {
    fn name(&self) -> &str {
        "broken"
    }

    fn declarations(&self) -> Result<Vec<ToggleDeclaration>> {
        Err(ToggleError::discovery("broken", "failed to load module"))
    }
}

fn registry(settings: MemorySettings) -> Registry {
    Registry::builder().declared().settings(settings).build()
}

#[test]
fn test_discovers_every_declared_toggle() {
    let registry = registry(MemorySettings::new());

    assert_eq!(registry.len(), 5);
    assert!(registry.contains(&ToggleId::of::<billing::InvoiceV2>()));
    assert!(registry.contains(&ToggleId::of::<search::Telemetry>()));
}

#[test]
fn test_broken_source_still_discovers_others() {
    let registry = Registry::builder()
        .source(BrokenModule)
        .declared()
        .source(StaticSource::new("manual").toggle("manual_toggle"))
        .build();

    assert_eq!(registry.len(), 6);
    assert!(registry.contains(&"manual_toggle".into()));
}

#[test]
fn test_unconfigured_declared_toggle_is_an_error() {
    let registry = registry(MemorySettings::new());

    let err = registry.is_enabled::<billing::InvoiceV2>().unwrap_err();
    assert!(err.is_not_configured());
    assert!(err.to_string().contains("InvoiceV2"));
}

#[test]
fn test_declared_strategies() {
    let registry = registry(MemorySettings::new());

    assert_eq!(registry.is_enabled::<search::FuzzySearch>(), Ok(true));
    assert_eq!(registry.is_enabled::<billing::LegacyExport>(), Ok(false));
    // Absent settings fall back to the declared default
    assert_eq!(registry.is_enabled::<search::BetaRanking>(), Ok(true));
    assert_eq!(registry.is_enabled::<search::Telemetry>(), Ok(false));
}

#[test]
fn test_declared_setting_reads_settings() {
    let settings = MemorySettings::new()
        .with("beta_ranking", "false")
        .with("telemetry", "true");
    let registry = registry(settings);

    assert_eq!(registry.is_enabled::<search::BetaRanking>(), Ok(false));
    assert_eq!(registry.is_enabled::<search::Telemetry>(), Ok(true));
}

#[test]
fn test_explicit_configuration_wins_over_declaration() {
    let registry = registry(MemorySettings::new());

    registry
        .configure::<billing::LegacyExport>()
        .always_true()
        .unwrap();
    assert_eq!(registry.is_enabled::<billing::LegacyExport>(), Ok(true));

    registry.reset();
    assert_eq!(registry.is_enabled::<billing::LegacyExport>(), Ok(false));
}

#[test]
fn test_setting_wrong_case_is_disabled() {
    let settings = MemorySettings::new().with("invoice_v2", "TRUE");
    let registry = registry(settings.clone());

    registry
        .configure::<billing::InvoiceV2>()
        .configured()
        .with_setting()
        .named("invoice_v2")
        .unwrap();
    assert_eq!(registry.is_enabled::<billing::InvoiceV2>(), Ok(false));

    settings.set("invoice_v2", "true");
    assert_eq!(registry.is_enabled::<billing::InvoiceV2>(), Ok(true));
}

#[test]
fn test_cached_toggle_ignores_later_setting_changes() {
    let settings = MemorySettings::new().with("telemetry", "true");
    let registry = registry(settings.clone());

    registry.configure::<search::Telemetry>().cached().unwrap();
    settings.set("telemetry", "false");

    assert_eq!(registry.is_enabled::<search::Telemetry>(), Ok(true));
}

#[test]
fn test_handle_execute() {
    let registry = registry(MemorySettings::new());

    let mut enabled_ran = false;
    let mut disabled_ran = false;
    registry
        .toggle::<billing::LegacyExport>()
        .run(|| enabled_ran = true, || disabled_ran = true)
        .unwrap();

    assert!(!enabled_ran);
    assert!(disabled_ran);
}

#[tokio::test]
async fn test_handle_execute_async() {
    let registry = registry(MemorySettings::new());

    let value = registry
        .toggle::<search::FuzzySearch>()
        .execute_async(|| async { "fuzzy" }, || async { "exact" })
        .await
        .unwrap();

    assert_eq!(value, "fuzzy");
}
