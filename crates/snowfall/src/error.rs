use core::num::ParseIntError;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowfall` can produce.
///
/// Generation itself never fails. Errors only come from configuring a
/// generator with out-of-range fields or from converting an ID out of text or
/// database representations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The text is not an unsigned base-10 integer that fits in 64 bits.
    #[error("invalid snowflake {input:?}: {source}")]
    Parse {
        /// The rejected input.
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// A database column held a type that cannot be converted into an ID.
    #[error("unsupported column type for snowflake: {kind}")]
    ColumnType {
        /// Name of the offending column type.
        kind: &'static str,
    },

    /// The worker ID does not fit in its 5-bit field.
    #[error("worker id {worker_id} exceeds maximum of {}", crate::Snowflake::MAX_WORKER_ID)]
    WorkerIdOverflow {
        /// The rejected worker ID.
        worker_id: u64,
    },

    /// The process ID does not fit in its 5-bit field.
    #[error("process id {process_id} exceeds maximum of {}", crate::Snowflake::MAX_PROCESS_ID)]
    ProcessIdOverflow {
        /// The rejected process ID.
        process_id: u64,
    },
}
