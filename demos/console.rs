//! Console walkthrough of every way to configure a toggle.
//!
//! Run with: `cargo run --example console --features full`
//!
//! Each line states whether it should be printed; a line ending in
//! "should not be printed" means something is wrong.

use togglekit::config::SettingsBuilder;
use togglekit::prelude::*;

// Configured below, at startup
toggle!(AlwaysOn);
toggle!(AlwaysOff);
toggle!(AppSetting);
toggle!(EnabledPredicate);
toggle!(DisabledPredicate);

// Configured by their declaration
toggle!(AlwaysOnDeclared => always_true);
toggle!(AlwaysOffDeclared => always_false);
toggle!(AppSettingDeclared => setting("test_toggle"));

fn report<T: Toggle>(when_enabled: &str, when_disabled: &str) -> togglekit::Result<()> {
    let line = Feature::<T>::execute(|| when_enabled, || when_disabled)?;
    println!("{line}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    togglekit::log::init();

    // Loads TOGGLEKIT_* variables and an optional .env file
    let settings = SettingsBuilder::new()
        .with_prefix("TOGGLEKIT")
        .load_dotenv(None)
        .build()?;
    if !settings.has("test_toggle") {
        settings.set("test_toggle", "true")?;
    }

    togglekit::global::install(Registry::builder().declared().settings(settings).build())?;

    Feature::<AlwaysOn>::select().always_true()?;
    Feature::<AlwaysOff>::select().always_false()?;
    Feature::<AppSetting>::select()
        .configured()
        .with_setting()
        .named("test_toggle")?;
    Feature::<EnabledPredicate>::select()
        .configured()
        .with_predicate(|| true)?;
    Feature::<DisabledPredicate>::select()
        .configured()
        .with_predicate(|| false)?;

    report::<AlwaysOn>(
        "Always on toggle is enabled. This should be printed.",
        "Always on toggle is disabled. This should not be printed.",
    )?;
    report::<AlwaysOff>(
        "Always off toggle is enabled. This should not be printed.",
        "Always off toggle is disabled. This should be printed.",
    )?;
    report::<AppSetting>(
        "Setting toggle is enabled. This should be printed.",
        "Setting toggle is disabled. This should not be printed.",
    )?;
    report::<AlwaysOnDeclared>(
        "Declared always on toggle is enabled. This should be printed.",
        "Declared always on toggle is disabled. This should not be printed.",
    )?;
    report::<AlwaysOffDeclared>(
        "Declared always off toggle is enabled. This should not be printed.",
        "Declared always off toggle is disabled. This should be printed.",
    )?;
    report::<AppSettingDeclared>(
        "Declared setting toggle is enabled. This should be printed.",
        "Declared setting toggle is disabled. This should not be printed.",
    )?;
    report::<EnabledPredicate>(
        "Predicate toggle returning true is enabled. This should be printed.",
        "Predicate toggle returning true is disabled. This should not be printed.",
    )?;
    report::<DisabledPredicate>(
        "Predicate toggle returning false is enabled. This should not be printed.",
        "Predicate toggle returning false is disabled. This should be printed.",
    )?;

    // Freeze the setting toggle; later changes to the store no longer apply
    Feature::<AppSetting>::select().cached()?;
    println!(
        "Cached setting toggle is {}.",
        if Feature::<AppSetting>::is_enabled()? { "enabled" } else { "disabled" }
    );

    Ok(())
}
