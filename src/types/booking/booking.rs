use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::booking::BookingStatus;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub trip_id: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    pub seats: u8,
    pub status: BookingStatus,
    pub created: DateTime<Utc>,
}
