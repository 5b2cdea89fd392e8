//! Helpers for partial-update payloads.
//!
//! A patch field is `Option<T>`: `None` means "leave the column alone". For
//! nullable columns that is not enough, because an explicit JSON `null` must
//! clear the column while an absent key must not touch it. Those fields are
//! `Option<Option<T>>` and deserialize through [`double_option`].

use serde::{Deserialize, Deserializer};

/// Deserialize a present key (including `null`) as `Some(inner)`.
///
/// Combine with `#[serde(default)]` so that a missing key stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
