//! Saved trip records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A destination the user chose to keep. Never mutated after creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripRecord {
    pub city: String,
    pub saved_at: DateTime<Utc>,
}

impl TripRecord {
    #[must_use]
    pub fn new(city: String, saved_at: DateTime<Utc>) -> Self {
        Self { city, saved_at }
    }
}
