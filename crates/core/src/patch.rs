//! Partial-update fields that can be left alone, cleared, or set.
//!
//! A patch field typed `Option<Option<T>>` reads as:
//! - `None`: the key was absent, keep the stored value,
//! - `Some(None)`: the key was `null`, clear the stored value,
//! - `Some(Some(v))`: replace the stored value with `v`.
//!
//! Plain `Option<T>` cannot tell an absent key from an explicit `null`, so
//! such fields need `#[serde(default, deserialize_with = "nullable")]`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key (including `null`) as `Some(..)`.
///
/// Absent keys never reach this function; `#[serde(default)]` fills them
/// with `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The value a patch field sets, if it sets one.
pub fn set_value(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|v| v.as_deref())
}
