//! Serialization helpers for service payloads

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit JSON `null` as the type's default value
///
/// The service emits `"details": null` and `"value": null` for empty
/// sequences; `#[serde(default)]` alone only covers absent fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
