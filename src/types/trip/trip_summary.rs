use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::booking::BookingStatus;
use crate::types::empty_string_as_none;

/// One row of the `tripHistory` server-side aggregation: a past trip of
/// the user joined with its driver and booking state.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    pub driver_name: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub driver_avatar: Option<String>,
    /// Fare in UZS
    pub price: u64,
    pub seats: u8,
    pub status: BookingStatus,
    pub completed_at: Option<DateTime<Utc>>,
}
