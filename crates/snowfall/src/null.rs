use crate::Snowflake;
use core::fmt;

/// A [`Snowflake`] that may be absent.
///
/// Absent is a value of its own, distinct from [`Snowflake::ZERO`]: it
/// serializes to JSON `null` and to a SQL `NULL` column, where a zero ID
/// serializes to `"0"` and `0`.
///
/// # Example
///
/// ```
/// use snowfall::{NullSnowflake, Snowflake};
///
/// let missing = NullSnowflake::from_str_opt(Some("not a number"));
/// assert!(!missing.is_valid());
/// assert_eq!(missing.value_or_zero(), Snowflake::ZERO);
///
/// let present = NullSnowflake::from_str_opt(Some("42"));
/// assert_eq!(present.get(), Some(Snowflake::from_raw(42)));
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NullSnowflake(Option<Snowflake>);

impl NullSnowflake {
    /// The absent value.
    pub const NULL: Self = Self(None);

    /// Pairs an ID with a validity flag. The ID is dropped when `valid` is
    /// false.
    pub const fn new(id: Snowflake, valid: bool) -> Self {
        if valid { Self(Some(id)) } else { Self(None) }
    }

    /// Wraps an optional ID.
    pub const fn from_option(id: Option<Snowflake>) -> Self {
        Self(id)
    }

    /// Parses an optional string.
    ///
    /// Both `None` and text that fails to parse give the absent value; the
    /// parse error is discarded. Use [`Snowflake::parse`] when the caller
    /// needs to tell the two apart.
    pub fn from_str_opt(s: Option<&str>) -> Self {
        Self(s.and_then(|s| Snowflake::parse(s).ok()))
    }

    /// Returns true when an ID is present.
    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the ID, if present.
    pub const fn get(&self) -> Option<Snowflake> {
        self.0
    }

    /// Returns the ID, or [`Snowflake::ZERO`] when absent.
    pub fn value_or_zero(&self) -> Snowflake {
        self.0.unwrap_or(Snowflake::ZERO)
    }
}

impl From<Option<Snowflake>> for NullSnowflake {
    fn from(id: Option<Snowflake>) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for NullSnowflake {
    fn from(id: Snowflake) -> Self {
        Self(Some(id))
    }
}

impl From<NullSnowflake> for Option<Snowflake> {
    fn from(id: NullSnowflake) -> Self {
        id.0
    }
}

impl fmt::Debug for NullSnowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => f.debug_tuple("NullSnowflake").field(&id).finish(),
            None => f.write_str("NullSnowflake(NULL)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_honours_validity_flag() {
        let id = Snowflake::from_raw(7);
        assert_eq!(NullSnowflake::new(id, true).get(), Some(id));
        assert_eq!(NullSnowflake::new(id, false), NullSnowflake::NULL);
    }

    #[test]
    fn null_differs_from_zero() {
        let zero = NullSnowflake::from(Snowflake::ZERO);
        assert!(zero.is_valid());
        assert_ne!(zero, NullSnowflake::NULL);
        assert_eq!(zero.value_or_zero(), NullSnowflake::NULL.value_or_zero());
    }

    #[test]
    fn from_str_opt_collapses_failures() {
        assert_eq!(NullSnowflake::from_str_opt(None), NullSnowflake::NULL);
        assert_eq!(NullSnowflake::from_str_opt(Some("")), NullSnowflake::NULL);
        assert_eq!(NullSnowflake::from_str_opt(Some("-5")), NullSnowflake::NULL);
        assert_eq!(
            NullSnowflake::from_str_opt(Some("18446744073709551615")).get(),
            Some(Snowflake::from_raw(u64::MAX))
        );
    }

    #[test]
    fn option_conversions() {
        let id = Snowflake::from_raw(99);
        assert_eq!(NullSnowflake::from_option(Some(id)), NullSnowflake::from(id));
        assert_eq!(Option::<Snowflake>::from(NullSnowflake::NULL), None);
        assert_eq!(NullSnowflake::default(), NullSnowflake::NULL);
    }

    #[test]
    fn debug_marks_null() {
        assert_eq!(format!("{:?}", NullSnowflake::NULL), "NullSnowflake(NULL)");
        assert!(format!("{:?}", NullSnowflake::from(Snowflake::from_raw(1))).contains("id: 1"));
    }
}
