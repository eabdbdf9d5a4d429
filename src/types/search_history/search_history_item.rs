use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::search_history::SearchQuery;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryItem {
    pub id: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: Option<NaiveDate>,
    /// How many times this exact query was submitted, starts at 1
    pub search_count: u32,
    pub last_searched: DateTime<Utc>,
}

impl SearchHistoryItem {
    pub fn new(query: SearchQuery, now: DateTime<Utc>) -> Self {
        SearchHistoryItem {
            id: now.timestamp_millis().to_string(),
            from_city: query.from_city,
            to_city: query.to_city,
            departure_date: query.departure_date,
            search_count: 1,
            last_searched: now,
        }
    }
    pub fn matches(&self, query: &SearchQuery) -> bool {
        self.from_city == query.from_city
            && self.to_city == query.to_city
            && self.departure_date == query.departure_date
    }
}
