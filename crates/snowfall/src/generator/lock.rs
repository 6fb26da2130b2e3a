use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{GeneratorConfig, Result, Snowflake, SystemClock, TimeSource};

#[derive(Debug)]
struct State {
    config: GeneratorConfig,
    epoch_millis: u64,
    sequence: u64,
}

impl State {
    fn new(config: GeneratorConfig) -> Self {
        Self {
            epoch_millis: config.epoch_millis(),
            config,
            sequence: 0,
        }
    }
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The epoch, worker ID, process ID and running sequence live behind one
/// [`Arc<Mutex<_>>`]. Cloning the generator shares that state, so hand clones
/// to every thread or task that needs IDs instead of reaching for a global.
///
/// The sequence is a single counter: it starts at zero on (re)initialization
/// and increments on every ID, wrapping from 4095 back to 0. It is not reset
/// when the clock ticks, so IDs stay unique as long as no more than 4096 are
/// requested within one millisecond. Exhaustion is not detected.
///
/// Two processes must never share a `(worker_id, process_id)` pair.
///
/// # Example
///
/// ```
/// use snowfall::{GeneratorConfig, LockSnowflakeGenerator, SystemClock, DISCORD_EPOCH};
///
/// let config = GeneratorConfig::try_new(DISCORD_EPOCH, 3, 7)?;
/// let generator = LockSnowflakeGenerator::new(config, SystemClock)?;
///
/// let a = generator.generate();
/// let b = generator.generate();
/// assert!(a < b);
/// assert_eq!(b.worker_id(), 3);
/// assert_eq!(b.process_id(), 7);
/// # Ok::<(), snowfall::Error>(())
/// ```
#[derive(Debug)]
pub struct LockSnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    state: Arc<Mutex<State>>,
    time: Arc<T>,
}

// Clones share the state and the clock, so `T` need not be `Clone`.
impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: Arc::clone(&self.time),
        }
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with the sequence at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOverflow`] or [`Error::ProcessIdOverflow`] if
    /// the configuration does not fit the bit layout.
    ///
    /// [`Error::WorkerIdOverflow`]: crate::Error::WorkerIdOverflow
    /// [`Error::ProcessIdOverflow`]: crate::Error::ProcessIdOverflow
    pub fn new(config: GeneratorConfig, time: T) -> Result<Self> {
        config.validate()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            epoch_ms = config.epoch_millis(),
            worker_id = config.worker_id,
            process_id = config.process_id,
            "snowflake generator initialized"
        );
        Ok(Self {
            state: Arc::new(Mutex::new(State::new(config))),
            time: Arc::new(time),
        })
    }

    /// Replaces the configuration and resets the sequence to zero.
    ///
    /// Takes the same lock as [`generate`](Self::generate), so concurrent
    /// callers see either the old or the new state, never a mix. IDs issued
    /// before the call are unaffected. On error the previous state is kept.
    ///
    /// # Errors
    ///
    /// See [`LockSnowflakeGenerator::new`].
    pub fn init(&self, config: GeneratorConfig) -> Result<()> {
        config.validate()?;
        *self.state.lock() = State::new(config);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            epoch_ms = config.epoch_millis(),
            worker_id = config.worker_id,
            process_id = config.process_id,
            "snowflake generator re-initialized"
        );
        Ok(())
    }

    /// Returns the active configuration.
    pub fn config(&self) -> GeneratorConfig {
        self.state.lock().config
    }

    /// Generates the next ID.
    ///
    /// The clock read, the packing and the sequence increment happen under
    /// one lock, so no two calls observe the same sequence value. A clock
    /// reading earlier than the epoch yields a zero timestamp. Timestamps
    /// past the 42-bit field wrap.
    ///
    /// # Example
    ///
    /// ```
    /// use snowfall::{GeneratorConfig, LockSnowflakeGenerator, SystemClock};
    ///
    /// let generator = LockSnowflakeGenerator::new(GeneratorConfig::default(), SystemClock)?;
    /// let first = generator.generate();
    /// let second = generator.generate();
    /// assert_eq!(first.sequence(), 0);
    /// assert_eq!(second.sequence(), 1);
    /// # Ok::<(), snowfall::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Snowflake {
        let mut state = self.state.lock();
        let now = self.time.current_millis();

        let id = Snowflake::from_components(
            now.saturating_sub(state.epoch_millis),
            state.config.worker_id,
            state.config.process_id,
            state.sequence,
        );
        state.sequence = (state.sequence + 1) & Snowflake::SEQUENCE_MASK;
        id
    }
}
