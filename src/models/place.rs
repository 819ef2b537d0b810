//! Place records from the external places provider.

use serde::{Deserialize, Serialize};

/// A place as returned by the places provider and stored verbatim when
/// favourited.
///
/// The provider attaches an open-ended set of fields (photos, rating,
/// vicinity, geometry, ...). Only `place_id` is contractually significant;
/// everything else is carried through storage round-trips untouched in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Stable identifier assigned by the places provider.
    pub place_id: String,
    /// Display name (may be empty for bare provider records).
    #[serde(default)]
    pub name: String,
    /// All other provider fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlaceRecord {
    pub fn new(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}
