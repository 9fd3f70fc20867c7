//! Serializable engine settings.

use crate::builder::error::BuildError;
use crate::core::{TransitionName, TransitionTable};
use crate::engine::ExtraFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Engine configuration that can live in a settings file.
///
/// ```rust
/// use transitioner::builder::EngineSettings;
///
/// let settings = EngineSettings::from_json(r#"{
///     "name": "bookings",
///     "extra_fields": "strict",
///     "aliases": { "approve": "confirm" },
///     "transitions": {
///         "pending": { "confirm": "confirmed" },
///         "confirmed": {}
///     }
/// }"#).unwrap();
///
/// assert_eq!(settings.name.as_deref(), Some("bookings"));
/// assert_eq!(settings.transitions.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Name reported in the engine's id.
    pub name: Option<String>,
    /// Policy for fields beyond the reserved set.
    pub extra_fields: ExtraFields,
    /// Transition aliases, alias to canonical name.
    pub aliases: BTreeMap<TransitionName, TransitionName>,
    /// The transition table.
    pub transitions: TransitionTable,
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }
}
