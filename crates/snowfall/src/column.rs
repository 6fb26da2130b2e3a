//! Driver-agnostic database column binding.
//!
//! IDs are stored as a signed 64-bit integer column holding the same bits as
//! the `u64` (values above `i64::MAX` come back negative). Reading also
//! accepts a decimal text column, which is how some drivers hand back
//! `NUMERIC` or `TEXT` keys.

use crate::{Error, NullSnowflake, Result, Snowflake};

/// A single database column value, as handed over by a driver.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValue {
    /// SQL `NULL`.
    Null,
    /// A signed 64-bit integer column.
    Integer(i64),
    /// A floating point column. Never a valid ID.
    Real(f64),
    /// A text or decimal column.
    Text(String),
    /// A binary column. Never a valid ID.
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// Name of the column type, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// Returns `true` for [`ColumnValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Snowflake {
    /// Converts a column value into an ID.
    ///
    /// - `Integer` is reinterpreted bit for bit.
    /// - `Text` is parsed as unsigned decimal.
    /// - `Null` gives [`Snowflake::ZERO`]; use [`NullSnowflake::from_column`]
    ///   to keep `NULL` distinct.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for text that is not a valid ID and
    /// [`Error::ColumnType`] for `Real` and `Blob` columns.
    pub fn from_column(value: &ColumnValue) -> Result<Self> {
        match value {
            ColumnValue::Null => Ok(Self::ZERO),
            ColumnValue::Integer(v) => Ok(Self::from_raw(*v as u64)),
            ColumnValue::Text(s) => Self::parse(s),
            other => Err(Error::ColumnType { kind: other.kind() }),
        }
    }

    /// Converts the ID into an `Integer` column with the same bits.
    pub const fn to_column(&self) -> ColumnValue {
        ColumnValue::Integer(self.to_raw() as i64)
    }
}

impl NullSnowflake {
    /// Converts a column value, mapping `Null` to the absent value.
    ///
    /// # Errors
    ///
    /// Same as [`Snowflake::from_column`] for non-null values.
    pub fn from_column(value: &ColumnValue) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::NULL);
        }
        Snowflake::from_column(value).map(Self::from)
    }

    /// Converts into a column value; absent becomes `Null`.
    pub const fn to_column(&self) -> ColumnValue {
        match self.get() {
            Some(id) => id.to_column(),
            None => ColumnValue::Null,
        }
    }
}

impl From<Snowflake> for ColumnValue {
    fn from(id: Snowflake) -> Self {
        id.to_column()
    }
}

impl From<NullSnowflake> for ColumnValue {
    fn from(id: NullSnowflake) -> Self {
        id.to_column()
    }
}

impl TryFrom<&ColumnValue> for Snowflake {
    type Error = Error;

    fn try_from(value: &ColumnValue) -> Result<Self> {
        Self::from_column(value)
    }
}

impl TryFrom<&ColumnValue> for NullSnowflake {
    type Error = Error;

    fn try_from(value: &ColumnValue) -> Result<Self> {
        Self::from_column(value)
    }
}
