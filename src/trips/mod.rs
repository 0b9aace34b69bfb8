//! Saved trips
//!
//! [`TripStore`] is the save/list seam behind the trip endpoints. The server
//! persists through [`FjallTripStore`]; other processes reach the same
//! records over HTTP with [`HttpTripStoreClient`].

pub mod client;
pub mod store;

pub use client::HttpTripStoreClient;
pub use store::FjallTripStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::models::TripRecord;

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persist a new record and return it as stored
    async fn save(&self, city: String, saved_at: DateTime<Utc>) -> Result<TripRecord>;

    /// Every record, newest first
    async fn list(&self) -> Result<Vec<TripRecord>>;
}
