use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use core::time::Duration;
use snowfall::{DISCORD_EPOCH, GeneratorConfig};

/// Runtime configuration for the `snowfall` binary.
///
/// Generator settings are parsed from CLI arguments or environment variables
/// (a `.env` file in the working directory is loaded first). The defaults
/// produce Discord-compatible IDs from worker 0, process 0.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowfall",
    version,
    about = "Generate and inspect 64-bit Snowflake IDs"
)]
pub struct CliArgs {
    /// Epoch the timestamp field counts from, in milliseconds since
    /// 1970-01-01 UTC.
    ///
    /// Must match the epoch the IDs were generated with when inspecting.
    ///
    /// Environment variable: `SNOWFALL_EPOCH_MS`
    #[arg(long, env = "SNOWFALL_EPOCH_MS", global = true, default_value_t = DISCORD_EPOCH.as_millis() as u64)]
    pub epoch_ms: u64,

    /// Worker (machine or shard) ID, 0 to 31.
    ///
    /// Environment variable: `SNOWFALL_WORKER_ID`
    #[arg(long, env = "SNOWFALL_WORKER_ID", global = true, default_value_t = 0)]
    pub worker_id: u64,

    /// Process slot within the worker, 0 to 31.
    ///
    /// Environment variable: `SNOWFALL_PROCESS_ID`
    #[arg(long, env = "SNOWFALL_PROCESS_ID", global = true, default_value_t = 0)]
    pub process_id: u64,

    /// Print JSON instead of plain text. IDs are always JSON strings.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate new IDs, one per line.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Number of threads sharing the generator.
        #[arg(short, long, default_value_t = 1)]
        threads: usize,
    },

    /// Decode IDs into their timestamp, worker, process and sequence fields.
    Inspect {
        /// IDs in decimal form.
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub generator: GeneratorConfig,
    pub json: bool,
    pub command: Command,
}

impl TryFrom<CliArgs> for Settings {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let generator = GeneratorConfig::try_new(
            Duration::from_millis(args.epoch_ms),
            args.worker_id,
            args.process_id,
        )
        .context("invalid generator configuration")?;

        if let Command::Generate { count, threads } = &args.command {
            if *count == 0 {
                bail!("--count must be greater than 0");
            }
            if *threads == 0 {
                bail!("--threads must be greater than 0");
            }
            if threads > count {
                bail!("--threads ({threads}) exceeds --count ({count})");
            }
        }

        Ok(Self {
            generator,
            json: args.json,
            command: args.command,
        })
    }
}
