use serde::{Deserialize, Serialize};

use crate::types::geo::{PlaceSuggestion, Point};

/// One entry of the bundled city list.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LocalCity {
    pub name: String,
    pub point: Point,
}

impl LocalCity {
    pub fn new(name: &str, point: Point) -> Self {
        LocalCity {
            name: name.to_owned(),
            point,
        }
    }
    pub fn to_suggestion(&self) -> PlaceSuggestion {
        PlaceSuggestion {
            name: self.name.to_owned(),
            description: "Узбекистан".to_owned(),
            point: self.point.to_owned(),
        }
    }
}
