//! Car domain entity

use chrono::{DateTime, Utc};

/// A rentable car
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i32,
    pub name: String,
    /// Daily price in the smallest currency unit
    pub price: i64,
    /// Size category (e.g. "small", "medium", "large")
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable car fields, shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct CarInput {
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
}

/// Listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    /// Exact match on size
    pub size: Option<String>,
    /// Exclude cars still rented on or after this instant
    pub available_at: Option<DateTime<Utc>>,
}

impl CarFilter {
    /// In-memory evaluation of the filter. `rental_ends` are the end instants
    /// of every rental recorded for `car`.
    pub fn matches(&self, car: &Car, rental_ends: &[DateTime<Utc>]) -> bool {
        if let Some(ref size) = self.size {
            if &car.size != size {
                return false;
            }
        }
        if let Some(at) = self.available_at {
            if rental_ends.iter().any(|end| *end >= at) {
                return false;
            }
        }
        true
    }
}
