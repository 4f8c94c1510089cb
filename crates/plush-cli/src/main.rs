//! CLI frontend for the Plush comfort trigger.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "plush",
    about = "Plush: run and inspect escalating-chance comfort triggers",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo colony with one plush and report what it did
    Simulate {
        /// Number of ticks to simulate (default: one in-game day)
        #[arg(short, long, default_value = "60000")]
        ticks: u64,

        /// RNG seed for deterministic simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Colonists on the plush's map
        #[arg(long, default_value = "3")]
        colonists: usize,

        /// Animals on the plush's map (never buffed)
        #[arg(long, default_value = "1")]
        animals: usize,

        /// Leave the custom sounds out of the catalog to exercise the fallback
        #[arg(long)]
        no_sounds: bool,

        /// Settings file to apply (default: none, component defaults)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Restore trigger state from a save file before running
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write trigger state to a save file after running
        #[arg(long)]
        save: Option<PathBuf>,

        /// Show all events (not just notable ones)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show or change the persisted trigger settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,

        /// Settings file
        #[arg(short, long, default_value = commands::settings::DEFAULT_FILE, global = true)]
        file: PathBuf,
    },

    /// Print the inspect text of every trigger in a save file
    Inspect {
        /// Save file written by `plush simulate --save`
        file: PathBuf,

        /// Settings used to fill in a missing chance
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings and the guarantee estimate
    Show,

    /// Change one or more settings (values are clamped to their allowed range)
    Set {
        /// Starting chance and reset target, as a probability
        #[arg(long)]
        base_chance: Option<f32>,

        /// Added to the chance after each failed roll
        #[arg(long)]
        increment: Option<f32>,

        /// Whether failed rolls raise the chance (true/false)
        #[arg(long)]
        enable_increase: Option<bool>,
    },

    /// Restore every setting to its default
    Reset,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Simulate {
            ticks,
            seed,
            colonists,
            animals,
            no_sounds,
            settings,
            resume,
            save,
            verbose,
        } => commands::simulate::run(&commands::simulate::SimulateArgs {
            ticks,
            seed,
            colonists,
            animals,
            no_sounds,
            settings,
            resume,
            save,
            verbose,
        }),
        Commands::Settings { action, file } => match action {
            SettingsAction::Show => commands::settings::show(&file),
            SettingsAction::Set {
                base_chance,
                increment,
                enable_increase,
            } => commands::settings::set(&file, base_chance, increment, enable_increase),
            SettingsAction::Reset => commands::settings::reset(&file),
        },
        Commands::Inspect { file, settings } => {
            commands::inspect::run(&file, settings.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
