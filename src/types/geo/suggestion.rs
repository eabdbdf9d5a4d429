use serde::{Deserialize, Serialize};

use crate::types::geo::Point;

/// The common shape every geocoding provider response is normalized into.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    pub name: String,
    pub description: String,
    pub point: Point,
}
