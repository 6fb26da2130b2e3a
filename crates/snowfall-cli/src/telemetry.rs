//! Log output for the `snowfall` binary.
//!
//! Events go to stderr so stdout carries nothing but IDs. The filter is read
//! from `SNOWFALL_LOG`, then `RUST_LOG`, and defaults to `warn`:
//!
//! ```bash
//! SNOWFALL_LOG=snowfall=trace snowfall generate -n 3
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("SNOWFALL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| "warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
