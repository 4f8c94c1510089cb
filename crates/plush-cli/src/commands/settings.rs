use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use plush_trigger::TriggerProps;
use plush_trigger::TriggerSettings;
use plush_trigger::settings::{BASE_CHANCE_RANGE, INCREMENT_RANGE};

use super::percent;

/// Settings file used when `--file` is not given.
pub const DEFAULT_FILE: &str = "plush-settings.json";

pub fn show(file: &Path) -> Result<(), String> {
    let settings = load(file)?;
    let origin = if file.exists() {
        file.display().to_string()
    } else {
        format!("{} (not written yet, defaults)", file.display())
    };
    println!("  {} {}", "Settings".bold(), origin.dimmed());
    println!();
    print_settings(&settings);
    Ok(())
}

pub fn set(
    file: &Path,
    base_chance: Option<f32>,
    increment: Option<f32>,
    enable_increase: Option<bool>,
) -> Result<(), String> {
    if base_chance.is_none() && increment.is_none() && enable_increase.is_none() {
        return Err(
            "nothing to set: pass --base-chance, --increment or --enable-increase".into(),
        );
    }

    for (what, value) in [("base chance", base_chance), ("increment", increment)] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(format!("{what} must be a finite number"));
        }
    }

    let mut settings = load(file)?;
    if let Some(chance) = base_chance {
        settings.set_base_chance(chance);
        if settings.base_chance != chance {
            warn_clamped("base chance", chance, settings.base_chance);
        }
    }
    if let Some(increment) = increment {
        settings.set_chance_increment(increment);
        if settings.chance_increment != increment {
            warn_clamped("increment", increment, settings.chance_increment);
        }
    }
    if let Some(enabled) = enable_increase {
        settings.enable_chance_increase = enabled;
    }

    save(&settings, file)?;
    println!("  {} {}", "Updated".green().bold(), file.display());
    println!();
    print_settings(&settings);
    Ok(())
}

pub fn reset(file: &Path) -> Result<(), String> {
    let mut settings = load(file)?;
    settings.reset();
    save(&settings, file)?;
    println!("  {} {}", "Reset".green().bold(), file.display());
    println!();
    print_settings(&settings);
    Ok(())
}

fn load(file: &Path) -> Result<TriggerSettings, String> {
    TriggerSettings::load_or_default(file)
        .map_err(|e| format!("cannot read settings {}: {e}", file.display()))
}

fn save(settings: &TriggerSettings, file: &Path) -> Result<(), String> {
    debug!(path = %file.display(), ?settings, "writing settings");
    settings
        .save(file)
        .map_err(|e| format!("cannot write settings {}: {e}", file.display()))
}

fn warn_clamped(what: &str, requested: f32, applied: f32) {
    eprintln!(
        "  {} {what} {} is out of range, using {}",
        "WARN".yellow().bold(),
        percent(requested),
        percent(applied)
    );
}

fn print_settings(settings: &TriggerSettings) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value", "Range"]);
    table.add_row(vec![
        "enable_chance_increase".to_string(),
        settings.enable_chance_increase.to_string(),
        "true / false".to_string(),
    ]);
    table.add_row(vec![
        "base_chance".to_string(),
        percent(settings.base_chance),
        format!(
            "{} - {}",
            percent(BASE_CHANCE_RANGE.0),
            percent(BASE_CHANCE_RANGE.1)
        ),
    ]);
    table.add_row(vec![
        "chance_increment".to_string(),
        percent(settings.chance_increment),
        format!(
            "{} - {}",
            percent(INCREMENT_RANGE.0),
            percent(INCREMENT_RANGE.1)
        ),
    ]);
    println!("{table}");
    println!();

    let interval = TriggerProps::default().tick_interval;
    match (
        settings.checks_to_guarantee(),
        settings.minutes_to_guarantee(interval),
    ) {
        (Some(checks), Some(minutes)) => println!(
            "  Guaranteed within {checks} checks (about {minutes:.1} minutes at {interval} ticks per check)"
        ),
        _ => println!(
            "  {}",
            "Chance increase disabled: no guaranteed trigger".dimmed()
        ),
    }
}
