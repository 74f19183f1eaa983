//! Rental domain entity and admission rules

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// A recorded rental of one car by one user
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn window(&self) -> RentalWindow {
        RentalWindow {
            start: self.rent_started_at,
            end: self.rent_ended_at,
        }
    }
}

/// Half-open rental period `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RentalWindow {
    /// Build a window from the requested bounds; a missing end means one day.
    pub fn requested(
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        let end = end.unwrap_or(start + Duration::days(1));
        if end <= start {
            return Err(DomainError::Validation(
                "rentEndedAt must be after rentStartedAt".to_string(),
            ));
        }
        Ok(Self { start, end })
    }
}

/// Which existing rentals block a new request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Any interval intersection: `existing.start < req.end && existing.end > req.start`
    #[default]
    Overlap,
    /// Only rentals nested inside the requested window:
    /// `existing.start >= req.start && existing.end <= req.end`
    Contained,
}

impl ConflictPolicy {
    pub fn conflicts(&self, existing: &RentalWindow, requested: &RentalWindow) -> bool {
        match self {
            ConflictPolicy::Overlap => {
                existing.start < requested.end && existing.end > requested.start
            }
            ConflictPolicy::Contained => {
                existing.start >= requested.start && existing.end <= requested.end
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Overlap => "overlap",
            ConflictPolicy::Contained => "contained",
        }
    }
}

/// Rental request that passed input validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub user_id: i32,
    pub car_id: i32,
    pub window: RentalWindow,
}

/// Outcome of the admission check
#[derive(Debug, Clone, PartialEq)]
pub enum RentalAdmission {
    Admitted(Rental),
    /// Rejected; carries the first conflicting rental found
    Conflict(Rental),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn window(from: u32, to: u32) -> RentalWindow {
        RentalWindow {
            start: day(from),
            end: day(to),
        }
    }

    #[test]
    fn missing_end_defaults_to_one_day() {
        let w = RentalWindow::requested(day(3), None).unwrap();
        assert_eq!(w.end, day(4));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = RentalWindow::requested(day(5), Some(day(5))).unwrap_err();
        assert_eq!(err.name(), "ValidationError");
    }

    #[test]
    fn both_policies_reject_a_window_containing_an_existing_rental() {
        let existing = window(10, 12);
        let requested = window(9, 13);
        assert!(ConflictPolicy::Overlap.conflicts(&existing, &requested));
        assert!(ConflictPolicy::Contained.conflicts(&existing, &requested));
    }

    #[test]
    fn partial_overlap_only_blocks_under_overlap_policy() {
        let existing = window(10, 12);
        let requested = window(11, 14);
        assert!(ConflictPolicy::Overlap.conflicts(&existing, &requested));
        assert!(!ConflictPolicy::Contained.conflicts(&existing, &requested));
    }

    #[test]
    fn back_to_back_rentals_do_not_conflict() {
        let existing = window(10, 12);
        let requested = window(12, 14);
        assert!(!ConflictPolicy::Overlap.conflicts(&existing, &requested));
        assert!(!ConflictPolicy::Contained.conflicts(&existing, &requested));
    }

    #[test]
    fn policy_deserializes_from_lowercase() {
        let p: ConflictPolicy = serde_json::from_str("\"contained\"").unwrap();
        assert_eq!(p, ConflictPolicy::Contained);
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Overlap);
    }
}
