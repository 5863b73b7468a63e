use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{PinStore, StoreError};
use crate::models::{CanonicalPin, Pin};

/// Process-local store for running without PostgreSQL.
///
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryPinStore {
    pins: RwLock<HashMap<String, Pin>>,
}

impl MemoryPinStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pins.read().await.is_empty()
    }
}

#[async_trait]
impl PinStore for MemoryPinStore {
    async fn upsert(&self, pin: CanonicalPin) -> Result<Pin, StoreError> {
        let mut pins = self.pins.write().await;
        let row = Pin::from_canonical(pin, Utc::now());
        pins.insert(row.pin_id.clone(), row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Pin>, StoreError> {
        let pins = self.pins.read().await;
        let mut rows: Vec<Pin> = pins.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.pin_id.cmp(&b.pin_id))
        });
        Ok(rows)
    }

    async fn get_by_id(&self, pin_id: &str) -> Result<Option<Pin>, StoreError> {
        Ok(self.pins.read().await.get(pin_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        let pins = self.len().await;
        tracing::info!(pins, "Discarding in-memory pin store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn pin(id: &str, title: &str, created_at: DateTime<Utc>) -> CanonicalPin {
        CanonicalPin {
            pin_id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: format!("https://i.pinimg.com/1200x/{id}.jpg"),
            link: format!("https://www.pinterest.com/pin/{id}/"),
            board: String::new(),
            created_at,
        }
    }

    #[tokio::test]
    async fn upsert_same_id_keeps_one_record_with_latest_fields() {
        let store = MemoryPinStore::new();
        store.upsert(pin("1", "first", at(0))).await.unwrap();
        store.upsert(pin("1", "second", at(5))).await.unwrap();

        assert_eq!(store.len().await, 1);
        let stored = store.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored.title, "second");
        assert_eq!(stored.created_at, at(5));
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let store = MemoryPinStore::new();
        store.upsert(pin("t1", "a", at(1))).await.unwrap();
        store.upsert(pin("t3", "c", at(3))).await.unwrap();
        store.upsert(pin("t2", "b", at(2))).await.unwrap();

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.pin_id)
            .collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn list_all_breaks_ties_by_pin_id() {
        let store = MemoryPinStore::new();
        store.upsert(pin("b", "b", at(1))).await.unwrap();
        store.upsert(pin("a", "a", at(1))).await.unwrap();

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.pin_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_pin() {
        let store = MemoryPinStore::new();
        assert!(store.get_by_id("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_upserts_of_same_pin_never_duplicate() {
        let store = std::sync::Arc::new(MemoryPinStore::new());
        let writers: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert(pin("shared", &format!("title-{i}"), at(i)))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }

        assert_eq!(store.len().await, 1);
        let stored = store.get_by_id("shared").await.unwrap().unwrap();
        // Whole-record writes: title and created_at come from the same writer.
        let n: i64 = stored.title.trim_start_matches("title-").parse().unwrap();
        assert_eq!(stored.created_at, at(n));
    }

    #[tokio::test]
    async fn close_can_run_on_a_spawned_task() {
        let store: std::sync::Arc<dyn PinStore> = std::sync::Arc::new(MemoryPinStore::new());
        store.upsert(pin("1", "kept", at(0))).await.unwrap();

        let closer = store.clone();
        tokio::spawn(async move { closer.close().await })
            .await
            .unwrap();
    }
}
