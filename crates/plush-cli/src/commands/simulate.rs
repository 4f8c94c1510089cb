use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use plush_core::{Actor, RaceClass};
use plush_trigger::{
    SaveFile, SimConfig, Simulation, TICKS_PER_SECOND, TriggerEventKind, TriggerProps,
};

use super::{PLAYER, demo_plush, demo_world, load_settings, percent};

/// Options for `plush simulate`.
pub struct SimulateArgs {
    pub ticks: u64,
    pub seed: u64,
    pub colonists: usize,
    pub animals: usize,
    pub no_sounds: bool,
    pub settings: Option<PathBuf>,
    pub resume: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub verbose: bool,
}

pub fn run(args: &SimulateArgs) -> Result<(), String> {
    let world = demo_world(args.colonists, args.animals, !args.no_sounds)?;
    let store = load_settings(args.settings.as_deref())?;

    let config = SimConfig::default()
        .with_seed(args.seed)
        .with_max_events(1000);
    let props = TriggerProps::default();
    let mut sim = Simulation::new(world, config).with_settings(store);
    let plush = sim
        .spawn_trigger(demo_plush(), props.clone())
        .map_err(|e| format!("cannot attach trigger: {e}"))?;

    if let Some(path) = &args.resume {
        let save = SaveFile::load(path)
            .map_err(|e| format!("cannot read save {}: {e}", path.display()))?;
        if sim.load_state(&save) == 0 {
            return Err(format!("{} holds no state for the demo plush", path.display()));
        }
    }

    info!(ticks = args.ticks, seed = args.seed, "running simulation");
    sim.run(args.ticks);

    // Header
    let rolls = sim
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e.kind, TriggerEventKind::Rolled { .. }))
        .count();
    let minutes = args.ticks as f64 / f64::from(TICKS_PER_SECOND) / 60.0;
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} ticks = {minutes:.1} min, seed={})",
            args.ticks, args.seed
        )
        .dimmed()
    );
    println!(
        "  {rolls} rolls, {} successes, {} sounds played",
        sim.events().successes(),
        sim.world().total_sounds_played()
    );
    if let Some(trigger) = sim.trigger(plush) {
        for line in trigger.status_string().lines() {
            println!("  {line}");
        }
    }
    println!();

    // Events
    if args.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let tick_label = format!("[tick {:>6}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = sim
            .events()
            .events()
            .iter()
            .filter(|e| !matches!(e.kind, TriggerEventKind::Rolled { success: false, .. }))
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for event in notable {
                let tick_label = format!("[tick {:>6}]", event.tick).dimmed();
                println!(
                    "  {tick_label} {}",
                    colorize_event(&event.kind, &event.description)
                );
            }
            println!();
        }
    }

    // Colonist table
    let eligible = sim
        .world()
        .query()
        .faction(PLAYER)
        .race(RaceClass::Humanlike)
        .alive()
        .spawned()
        .count();
    println!(
        "  {} {}",
        "Colony".bold().underline(),
        format!("({eligible} colonists can be comforted)").dimmed()
    );
    println!();

    let actors: Vec<&Actor> = sim.world().query().execute();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Race", "Faction", "Comfort", "Mood"]);
    for actor in actors {
        let faction = if actor.faction == Some(PLAYER) {
            "colony"
        } else {
            "visitor"
        };
        let comfort = actor
            .effect(&props.buff_effect)
            .map(|e| format!("{:.0}s left", e.remaining_ticks as f32 / TICKS_PER_SECOND as f32))
            .unwrap_or_else(|| "--".to_string());
        let mood = match (&actor.memories, actor.race) {
            (Some(bank), _) => format!("{:+.1}", bank.total_mood()),
            (None, RaceClass::Humanlike) => "n/a".to_string(),
            (None, _) => "--".to_string(),
        };
        table.add_row(vec![
            actor.name.clone(),
            actor.race.to_string(),
            faction.to_string(),
            comfort,
            mood,
        ]);
    }
    println!("{table}");
    println!();

    if let Some(path) = &args.save {
        sim.save_state()
            .save(path)
            .map_err(|e| format!("cannot write save {}: {e}", path.display()))?;
        info!(path = %path.display(), "wrote save file");
        println!("  Saved trigger state to {}", path.display());
    }

    let base = sim
        .trigger(plush)
        .map(|t| t.config().base_chance())
        .unwrap_or_default();
    println!("  {}", format!("Base chance in effect: {}", percent(base)).dimmed());

    Ok(())
}

fn colorize_event(kind: &TriggerEventKind, description: &str) -> colored::ColoredString {
    match kind {
        TriggerEventKind::Rolled { success: true, .. } => description.green().bold(),
        TriggerEventKind::Rolled { .. } => description.dimmed(),
        TriggerEventKind::SoundPlayed { fallback: true, .. } => description.yellow(),
        TriggerEventKind::SoundPlayed { .. } => description.cyan(),
        TriggerEventKind::SoundSkipped { .. } => description.yellow(),
        TriggerEventKind::BuffApplied { .. } => description.blue(),
        TriggerEventKind::DispatchAborted { .. } => description.red().bold(),
    }
}
