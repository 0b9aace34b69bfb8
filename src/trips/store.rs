use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fjall::Keyspace;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task;

use super::TripStore;
use crate::models::TripRecord;
use crate::{Result, TripCastError};

const KEY_LEN: usize = 16;

/// Trip records kept in a fjall keyspace, one postcard-encoded record per key.
///
/// Keys are the big-endian save instant followed by an inverted sequence
/// number, so a reverse scan yields newest first and trips saved at the same
/// instant come back in the order they were saved.
pub struct FjallTripStore {
    store: Keyspace,
    next_seq: AtomicU64,
}

fn record_key(saved_at: DateTime<Utc>, seq: u64) -> [u8; KEY_LEN] {
    let nanos = saved_at.timestamp_nanos_opt().unwrap_or_else(|| {
        if saved_at.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        }
    });
    // flip the sign bit so negative instants sort before positive ones
    let instant = (nanos as u64) ^ (1 << 63);

    let mut key = [0u8; KEY_LEN];
    key[..8].copy_from_slice(&instant.to_be_bytes());
    key[8..].copy_from_slice(&(u64::MAX - seq).to_be_bytes());
    key
}

fn key_seq(key: &[u8]) -> Option<u64> {
    let tail: [u8; 8] = key.get(8..KEY_LEN)?.try_into().ok()?;
    Some(u64::MAX - u64::from_be_bytes(tail))
}

fn next_free_seq(store: &Keyspace) -> anyhow::Result<u64> {
    let mut next = 0;
    for guard in store.iter() {
        let key = guard.key()?;
        if let Some(seq) = key_seq(&key).filter(|_| key.len() == KEY_LEN) {
            next = next.max(seq.saturating_add(1));
        }
    }
    Ok(next)
}

fn read_records(store: Keyspace) -> anyhow::Result<Vec<TripRecord>> {
    let mut records = Vec::new();
    for guard in store.iter().rev() {
        let (key, value) = guard.into_inner()?;
        match postcard::from_bytes::<TripRecord>(&value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping unreadable trip record {:02x?}: {}", &*key, e),
        }
    }
    Ok(records)
}

fn write_record(store: Keyspace, key: [u8; KEY_LEN], record: &TripRecord) -> anyhow::Result<()> {
    let bytes = postcard::to_stdvec(record)?;
    store.insert(key.to_vec(), bytes)?;
    Ok(())
}

impl FjallTripStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("trips", fjall::KeyspaceCreateOptions::default)?;
        let next_seq = next_free_seq(&items)?;
        Ok(FjallTripStore {
            store: items,
            next_seq: AtomicU64::new(next_seq),
        })
    }
}

#[async_trait]
impl TripStore for FjallTripStore {
    #[tracing::instrument(name = "save_trip", level = "debug", skip(self))]
    async fn save(&self, city: String, saved_at: DateTime<Utc>) -> Result<TripRecord> {
        let record = TripRecord::new(city, saved_at);
        let key = record_key(saved_at, self.next_seq.fetch_add(1, Ordering::Relaxed));

        let store = self.store.clone();
        let stored = record.clone();
        task::spawn_blocking(move || write_record(store, key, &stored))
            .await
            .map_err(|e| TripCastError::store_write(e.to_string()))?
            .map_err(|e| TripCastError::store_write(e.to_string()))?;

        tracing::debug!("Saved trip to {}", record.city);
        Ok(record)
    }

    #[tracing::instrument(name = "list_trips", level = "debug", skip(self))]
    async fn list(&self) -> Result<Vec<TripRecord>> {
        let store = self.store.clone();
        task::spawn_blocking(move || read_records(store))
            .await
            .map_err(|e| TripCastError::store_read(e.to_string()))?
            .map_err(|e| TripCastError::store_read(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap()
    }

    async fn cities(store: &FjallTripStore) -> Vec<String> {
        store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.city)
            .collect()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallTripStore::open(dir.path()).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallTripStore::open(dir.path()).unwrap();

        let saved = store.save("Rome".to_string(), at(9)).await.unwrap();
        assert_eq!(saved, TripRecord::new("Rome".to_string(), at(9)));
        store.save("Paris".to_string(), at(12)).await.unwrap();
        store.save("Oslo".to_string(), at(7)).await.unwrap();

        assert_eq!(cities(&store).await, ["Paris", "Rome", "Oslo"]);
    }

    #[tokio::test]
    async fn test_same_instant_keeps_save_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallTripStore::open(dir.path()).unwrap();

        store.save("Lima".to_string(), at(8)).await.unwrap();
        store.save("Bern".to_string(), at(10)).await.unwrap();
        store.save("Kyiv".to_string(), at(10)).await.unwrap();
        store.save("Baku".to_string(), at(10)).await.unwrap();

        assert_eq!(cities(&store).await, ["Bern", "Kyiv", "Baku", "Lima"]);
    }

    #[tokio::test]
    async fn test_instants_before_epoch_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallTripStore::open(dir.path()).unwrap();

        let old = Utc.with_ymd_and_hms(1960, 1, 1, 0, 0, 0).unwrap();
        store.save("Havana".to_string(), old).await.unwrap();
        store.save("Quito".to_string(), at(1)).await.unwrap();

        assert_eq!(cities(&store).await, ["Quito", "Havana"]);
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FjallTripStore::open(dir.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save(format!("City {i}"), at(10)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut listed = cities(&store).await;
        listed.sort();
        let expected: Vec<_> = (0..8).map(|i| format!("City {i}")).collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_unreadable_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FjallTripStore::open(dir.path()).unwrap();

        store.save("Rome".to_string(), at(9)).await.unwrap();
        store
            .store
            .insert(record_key(at(11), 999).to_vec(), vec![0xff, 0xff, 0xff])
            .unwrap();

        assert_eq!(cities(&store).await, ["Rome"]);
        store.save("Paris".to_string(), at(12)).await.unwrap();
        assert_eq!(cities(&store).await, ["Paris", "Rome"]);
    }

    #[test]
    fn test_key_carries_sequence() {
        assert_eq!(key_seq(&record_key(at(3), 42)), Some(42));
        assert_eq!(key_seq(b"short"), None);
        assert!(record_key(at(3), 0) < record_key(at(4), 0));
        assert!(record_key(at(3), 1) < record_key(at(3), 0));
    }
}
