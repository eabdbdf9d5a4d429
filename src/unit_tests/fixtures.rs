use chrono::{TimeZone, Utc};

use crate::types::booking::{Booking, BookingStatus};
use crate::types::profile::{Auth, GdprConsent, Profile, User};

pub fn default_user() -> User {
    User {
        id: "user-1".to_owned(),
        email: "aziz@example.com".to_owned(),
        name: "Азиз Каримов".to_owned(),
        phone: Some("+998901234567".to_owned()),
        avatar: None,
        last_modified: Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap(),
        date_registered: Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap(),
        gdpr_consent: GdprConsent {
            tos: true,
            privacy: true,
            marketing: true,
            time: Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap(),
            from: "web".to_owned(),
        },
    }
}

pub fn default_auth() -> Auth {
    Auth {
        key: "auth-key-1".to_owned(),
        user: default_user(),
    }
}

pub fn authenticated_profile() -> Profile {
    Profile {
        auth: Some(default_auth()),
    }
}

pub fn default_booking(status: BookingStatus) -> Booking {
    Booking {
        id: "booking-1".to_owned(),
        trip_id: "trip-1".to_owned(),
        from_city: "Ташкент".to_owned(),
        to_city: "Самарканд".to_owned(),
        departure_date: "2023-09-10".parse().unwrap(),
        seats: 2,
        status,
        created: Utc.with_ymd_and_hms(2023, 9, 1, 10, 0, 0).unwrap(),
    }
}
