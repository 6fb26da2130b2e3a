use crate::{Error, Result, Snowflake, time::duration_millis};
use core::time::Duration;

/// The values a generator is (re)initialized with.
///
/// `Default` is the state of a generator nobody configured: the Unix epoch and
/// worker/process zero. It is valid, but every ID it produces carries a huge
/// timestamp and an ambiguous origin, so real deployments should always pick
/// an epoch and a distinct worker/process pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Reference instant, as a duration since 1970-01-01 UTC. Timestamps are
    /// measured from here; pick something close to the first deployment to
    /// get the most out of the 42-bit field (about 139 years).
    pub epoch: Duration,
    /// Worker (machine or shard) identifier, `0..=31`.
    pub worker_id: u64,
    /// Process slot within the worker, `0..=31`.
    pub process_id: u64,
}

impl GeneratorConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOverflow`] or [`Error::ProcessIdOverflow`] when
    /// an identifier does not fit its 5-bit field.
    pub fn try_new(epoch: Duration, worker_id: u64, process_id: u64) -> Result<Self> {
        let config = Self {
            epoch,
            worker_id,
            process_id,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the worker and process IDs fit the layout.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::try_new`].
    pub fn validate(&self) -> Result<()> {
        if self.worker_id > Snowflake::MAX_WORKER_ID {
            return Err(Error::WorkerIdOverflow {
                worker_id: self.worker_id,
            });
        }
        if self.process_id > Snowflake::MAX_PROCESS_ID {
            return Err(Error::ProcessIdOverflow {
                process_id: self.process_id,
            });
        }
        Ok(())
    }

    pub(crate) fn epoch_millis(&self) -> u64 {
        duration_millis(self.epoch)
    }
}
