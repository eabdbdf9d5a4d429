use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Lifecycle of a booking. The one shared definition every surface uses;
/// transitions are validated, not assumed.
#[derive(
    Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Debug,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
#[error("booking cannot change status from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

impl BookingStatus {
    /// `pending` can be confirmed or cancelled, `confirmed` can be
    /// completed or cancelled, `completed` and `cancelled` are terminal.
    pub fn can_transition(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
    pub fn transition(&self, next: BookingStatus) -> Result<BookingStatus, InvalidTransition> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: *self,
                to: next,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(Pending.transition(Confirmed), Ok(Confirmed));
        assert_eq!(Pending.transition(Cancelled), Ok(Cancelled));
        assert_eq!(Confirmed.transition(Completed), Ok(Completed));
        assert_eq!(Confirmed.transition(Cancelled), Ok(Cancelled));
    }

    #[test]
    fn test_terminal_statuses_reject_all_transitions() {
        for next in [Pending, Confirmed, Cancelled, Completed] {
            assert!(Completed.transition(next).is_err());
            assert!(Cancelled.transition(next).is_err());
        }
    }

    #[test]
    fn test_completed_cannot_be_cancelled() {
        assert_eq!(
            Completed.transition(Cancelled),
            Err(InvalidTransition {
                from: Completed,
                to: Cancelled
            })
        );
    }

    #[test]
    fn test_string_forms_match_the_wire_format() {
        assert_eq!(BookingStatus::Pending.to_string(), "pending");
        assert_eq!("completed".parse::<BookingStatus>(), Ok(Completed));
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }
}
