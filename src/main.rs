use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};

use gesturepad::Config;
use gesturepad::replay::{Replay, Script};

#[derive(Parser, Debug)]
#[command(name = "gesturepad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GESTUREPAD_GIT_HASH"), ")"),
    about = "Touchpad and button gesture recognizer for remote-control surfaces"
)]
struct Cli {
    /// Replay a TOML script of timestamped input events and print every output as JSON
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Use this configuration file instead of ~/.config/gesturepad/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load and validate the configuration, then print a summary
    #[arg(long, action = ArgAction::SetTrue)]
    check_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.check_config {
        let config = load_config(cli.config.as_deref())?;
        for line in config.summary() {
            println!("{line}");
        }
        println!("Configuration OK");
    } else if let Some(script_path) = cli.replay.as_deref() {
        let config = load_config(cli.config.as_deref())?;
        let script = Script::from_path(script_path)?;
        log::info!(
            "Replaying {} event(s) from {}",
            script.events.len(),
            script_path.display()
        );

        let outputs = Replay::from_config(&config).run(&script)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for output in &outputs {
            let line = serde_json::to_string(output).context("Failed to encode output")?;
            writeln!(out, "{line}")?;
        }
        log::info!("Replay produced {} output(s)", outputs.len());
    } else {
        // No flags: show usage
        println!("gesturepad: Touchpad and button gesture recognizer");
        println!();
        println!("Usage:");
        println!("  gesturepad --replay SCRIPT     Replay input events, print outputs as JSON lines");
        println!("  gesturepad --check-config      Validate and summarise the configuration");
        println!("  gesturepad --help              Show help");
        println!();
        println!("Options:");
        println!("  --config FILE                  Use FILE instead of the default config");
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
