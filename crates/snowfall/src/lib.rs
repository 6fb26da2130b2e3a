//! Compact, time-sortable 64-bit Snowflake IDs.
//!
//! Every [`Snowflake`] packs four fields, most significant first:
//!
//! ```text
//!  Bit Index:  63             22 21           17 16            12 11             0
//!              +----------------+---------------+----------------+---------------+
//!  Field:      | timestamp (42) | worker ID (5) | process ID (5) | sequence (12) |
//!              +----------------+---------------+----------------+---------------+
//!              |<----- MSB ------------------ 64 bits ------------------ LSB ----->|
//! ```
//!
//! IDs are produced by a [`LockSnowflakeGenerator`], an explicitly constructed
//! object that can be shared across threads:
//!
//! ```
//! use snowfall::{GeneratorConfig, LockSnowflakeGenerator, SystemClock};
//! use std::time::Duration;
//!
//! let config = GeneratorConfig::try_new(Duration::from_millis(1_577_840_400_000), 1, 1)?;
//! let generator = LockSnowflakeGenerator::new(config, SystemClock)?;
//!
//! let id = generator.generate();
//! assert_eq!(id.worker_id(), 1);
//! assert_eq!(id.process_id(), 1);
//! # Ok::<(), snowfall::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde` (default): IDs serialize as JSON strings, never numbers.
//! - `sqlite`: `rusqlite` `FromSql`/`ToSql` for [`Snowflake`] and
//!   [`NullSnowflake`].
//! - `tracing`: spans and events from the generator.

mod column;
mod error;
mod generator;
mod id;
mod null;
#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "sqlite")]
mod sqlite;
mod time;

pub use crate::column::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::null::*;
pub use crate::time::*;
