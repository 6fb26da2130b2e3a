#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Command, Settings};
use snowfall::MonotonicClock;
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let settings = Settings::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(config = ?settings.generator, "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match settings.command {
        Command::Generate { count, threads } => commands::generate(
            settings.generator,
            MonotonicClock::new(),
            count,
            threads,
            settings.json,
            &mut out,
        ),
        Command::Inspect { ids } => {
            commands::inspect(settings.generator.epoch, &ids, settings.json, &mut out)
        }
    }
}
