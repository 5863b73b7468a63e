//! Persisted pin collection, keyed by Pinterest pin id.
//!
//! Handlers and the ingestion pipeline only see [`PinStore`]; the concrete
//! backend is chosen once at startup and injected through `AppState`.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPinStore;
pub use postgres::PgPinStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CanonicalPin, Pin};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PinStore: Send + Sync {
    /// Insert the pin, or overwrite every field except `pin_id` if a record
    /// with the same key exists. Writes to the same key are serialized; the
    /// stored record always reflects exactly one write.
    async fn upsert(&self, pin: CanonicalPin) -> Result<Pin, StoreError>;

    /// All records, newest `created_at` first, ties broken by `pin_id`.
    async fn list_all(&self) -> Result<Vec<Pin>, StoreError>;

    async fn get_by_id(&self, pin_id: &str) -> Result<Option<Pin>, StoreError>;

    /// Liveness check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources. Called once at shutdown.
    async fn close(&self);
}
