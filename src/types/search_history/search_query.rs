use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One submitted trip search. City names are kept as displayed, not
/// normalized, and deduplication of the history is done on exact equality.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub from_city: String,
    pub to_city: String,
    pub departure_date: Option<NaiveDate>,
}
