//! Serde support.
//!
//! A [`Snowflake`] serializes as its decimal string, never as a number: JSON
//! consumers that store numbers as IEEE doubles silently lose precision past
//! 2^53. On the way in, the empty string, the string `"null"` and a JSON
//! `null` all decode to [`Snowflake::ZERO`].
//!
//! A [`NullSnowflake`] serializes as `null` when absent and as the string form
//! otherwise.
//!
//! ```
//! use snowfall::{NullSnowflake, Snowflake};
//!
//! let id = Snowflake::from_raw(u64::MAX);
//! assert_eq!(serde_json::to_string(&id)?, r#""18446744073709551615""#);
//! assert_eq!(serde_json::to_string(&NullSnowflake::NULL)?, "null");
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::{NullSnowflake, Snowflake};
use core::fmt;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

impl Serialize for Snowflake {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a snowflake as a decimal string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            "" | "null" => Ok(Snowflake::ZERO),
            _ => Snowflake::parse(v).map_err(de::Error::custom),
        }
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Snowflake::ZERO)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Snowflake::ZERO)
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Self-describing formats may hand us a null; binary formats only
        // ever carry the string we wrote.
        if d.is_human_readable() {
            d.deserialize_option(SnowflakeVisitor)
        } else {
            d.deserialize_str(SnowflakeVisitor)
        }
    }
}

impl Serialize for NullSnowflake {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(id) => s.serialize_some(&id),
            None => s.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullSnowflake {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Snowflake>::deserialize(d).map(Self::from)
    }
}
