use crate::{Error, Result, time::duration_millis};
use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

/// A 64-bit Snowflake ID.
///
/// - 42 bits timestamp (ms since the generator's epoch)
/// - 5 bits worker ID
/// - 5 bits process ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             22 21           17 16            12 11             0
///              +----------------+---------------+----------------+---------------+
///  Field:      | timestamp (42) | worker ID (5) | process ID (5) | sequence (12) |
///              +----------------+---------------+----------------+---------------+
///              |<----- MSB ------------------ 64 bits ------------------ LSB ----->|
/// ```
///
/// The canonical text form is the unsigned decimal value. The ID does not
/// remember its epoch, so timestamp extraction takes the epoch the generator
/// was configured with.
///
/// # Example
///
/// ```
/// use snowfall::Snowflake;
///
/// let id = Snowflake::from_components(5, 1, 1, 0);
/// assert_eq!(id.timestamp(), 5);
/// assert_eq!(id.worker_id(), 1);
/// assert_eq!(id.process_id(), 1);
/// assert_eq!(id.sequence(), 0);
/// assert_eq!(id.to_string(), "21106688");
/// assert_eq!("21106688".parse::<Snowflake>()?, id);
/// # Ok::<(), snowfall::Error>(())
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Snowflake {
    id: u64,
}

impl Snowflake {
    /// The zero ID. Also what a null text or column value decodes to.
    pub const ZERO: Self = Self { id: 0 };

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << 42) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 17
    /// through 21.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit process ID field. Occupies bits 12
    /// through 16.
    pub const PROCESS_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the worker ID to its correct position (bit 17).
    pub const WORKER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the process ID to its correct position (bit 12).
    pub const PROCESS_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Largest worker ID that fits the layout.
    pub const MAX_WORKER_ID: u64 = Self::WORKER_ID_MASK;

    /// Largest process ID that fits the layout.
    pub const MAX_PROCESS_ID: u64 = Self::PROCESS_ID_MASK;

    /// Largest sequence value before it wraps back to zero.
    pub const MAX_SEQUENCE: u64 = Self::SEQUENCE_MASK;

    /// Packs the four fields into an ID.
    ///
    /// Each field is masked to its width, so an oversized value is truncated
    /// instead of spilling into its neighbour.
    pub const fn from_components(
        timestamp: u64,
        worker_id: u64,
        process_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let process_id = (process_id & Self::PROCESS_ID_MASK) << Self::PROCESS_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | process_id | sequence,
        }
    }

    /// Wraps a raw 64-bit value without inspecting it.
    pub const fn from_raw(id: u64) -> Self {
        Self { id }
    }

    /// Returns the raw 64-bit value.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp (ms since epoch) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the process ID from the packed ID.
    pub const fn process_id(&self) -> u64 {
        (self.id >> Self::PROCESS_ID_SHIFT) & Self::PROCESS_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the creation time as milliseconds since the Unix epoch.
    ///
    /// `epoch` must be the one the generating process was configured with.
    pub fn unix_millis(&self, epoch: Duration) -> u64 {
        duration_millis(epoch).saturating_add(self.timestamp())
    }

    /// Returns the instant this ID was generated, at millisecond precision.
    ///
    /// `epoch` must be the one the generating process was configured with;
    /// the ID does not carry it. Like generation, only the whole milliseconds
    /// of `epoch` count, so this agrees with [`unix_millis`](Self::unix_millis).
    /// Returns `None` if the instant does not fit in a [`SystemTime`].
    ///
    /// ```
    /// use snowfall::Snowflake;
    /// use std::time::{Duration, UNIX_EPOCH};
    ///
    /// let epoch = Duration::from_millis(1_577_840_400_000);
    /// let id = Snowflake::from_components(5, 1, 1, 0);
    /// assert_eq!(id.created_at(epoch), Some(UNIX_EPOCH + epoch + Duration::from_millis(5)));
    /// ```
    pub fn created_at(&self, epoch: Duration) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_millis(self.unix_millis(epoch)))
    }

    /// Parses an ID from its canonical decimal form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `s` is empty, signed, padded with
    /// whitespace, contains anything but ASCII digits, or exceeds `u64::MAX`.
    pub fn parse(s: &str) -> Result<Self> {
        // `u64::from_str` tolerates a leading '+', the text form does not.
        let parsed = if s.starts_with('+') {
            "+".parse::<u64>()
        } else {
            s.parse::<u64>()
        };
        parsed
            .map(Self::from_raw)
            .map_err(|source| Error::Parse {
                input: s.to_owned(),
                source,
            })
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Unlike the canonical form, padded strings sort lexicographically in ID
    /// order.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self::from_raw(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.to_raw()
    }
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bit_layout_debug(f, self)
    }
}

struct FieldLayout {
    name: &'static str,
    bits: u8,
    value: u64,
}

fn fields(id: &Snowflake) -> [FieldLayout; 4] {
    [
        FieldLayout {
            name: "timestamp",
            bits: 42,
            value: id.timestamp(),
        },
        FieldLayout {
            name: "worker_id",
            bits: 5,
            value: id.worker_id(),
        },
        FieldLayout {
            name: "process_id",
            bits: 5,
            value: id.process_id(),
        },
        FieldLayout {
            name: "sequence",
            bits: 12,
            value: id.sequence(),
        },
    ]
}

fn write_bit_layout_debug(f: &mut fmt::Formatter<'_>, id: &Snowflake) -> fmt::Result {
    if !f.alternate() {
        let mut s = f.debug_struct("Snowflake");
        s.field("id", &id.id);
        for field in fields(id) {
            s.field(field.name, &field.value);
        }
        return s.finish();
    }

    let fields = fields(id);
    let widths: Vec<usize> = fields
        .iter()
        .map(|field| {
            let label_len = format!("{} ({})", field.name, field.bits).len();
            let dec_len = field.value.to_string().len();
            let hex_len = format!("0x{:x}", field.value).len();
            label_len.max(dec_len).max(hex_len) + 2
        })
        .collect();

    fn center(s: impl ToString, width: usize) -> String {
        let s = s.to_string();
        let pad = width.saturating_sub(s.len());
        let left = pad / 2;
        format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
    }

    fn border(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
        write!(f, "        +")?;
        for &w in widths {
            write!(f, "{}+", "-".repeat(w))?;
        }
        writeln!(f)
    }

    fn row(
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: impl Iterator<Item = String>,
    ) -> fmt::Result {
        write!(f, "        |")?;
        for (cell, &w) in cells.zip(widths) {
            write!(f, "{}|", center(cell, w))?;
        }
        writeln!(f)
    }

    writeln!(f, "Snowflake {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.id, id.id)?;
    writeln!(f, "    padded     : {}", id.to_padded_string())?;
    writeln!(f, "    layout     :")?;
    border(f, &widths)?;
    row(
        f,
        &widths,
        fields.iter().map(|x| format!("{} ({})", x.name, x.bits)),
    )?;
    border(f, &widths)?;
    row(f, &widths, fields.iter().map(|x| x.value.to_string()))?;
    row(f, &widths, fields.iter().map(|x| format!("0x{:x}", x.value)))?;
    border(f, &widths)?;
    write!(f, "}}")
}
