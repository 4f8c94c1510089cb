use std::path::Path;

use colored::Colorize;

use plush_trigger::{ConfigResolver, SaveFile, TriggerProps};

use super::load_settings;

/// Print the inspect text each saved trigger would show in game.
pub fn run(file: &Path, settings: Option<&Path>) -> Result<(), String> {
    let save =
        SaveFile::load(file).map_err(|e| format!("cannot read save {}: {e}", file.display()))?;
    let config = ConfigResolver::new(TriggerProps::default(), load_settings(settings)?);

    println!(
        "  {} {}",
        "Save".bold(),
        format!(
            "(version {}, tick {}, saved {})",
            save.version,
            save.tick,
            save.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
    );
    println!();

    if save.triggers.is_empty() {
        println!("  {}", "(no triggers)".dimmed());
        return Ok(());
    }

    for record in &save.triggers {
        let state = record.state.into_state(config.base_chance());
        println!("  {}", format!("Trigger {}", record.thing).bold());
        for line in state.status_string().lines() {
            println!("    {line}");
        }
        let next = next_check(&config, state.tick_counter, state.cooldown_counter);
        println!("    {}", format!("next check in {next} ticks").dimmed());
    }
    Ok(())
}

fn next_check(config: &ConfigResolver, tick_counter: u32, cooldown: u32) -> u32 {
    cooldown.saturating_add(config.tick_interval().saturating_sub(tick_counter))
}
