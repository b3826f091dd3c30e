// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub mod null_as_default {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
