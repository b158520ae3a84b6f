//! Backend DTOs and pure presentation rules. Nothing here touches the DOM.

pub mod backtest;
pub mod bots;
pub mod dashboard;
pub mod errors;
pub mod i18n;
pub mod logging;
pub mod market;
pub mod notifications;
pub mod portfolio;
pub mod preferences;

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
