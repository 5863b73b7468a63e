//! Search → normalize → upsert.
//!
//! The pipeline never fails outright: an upstream error turns into
//! [`IngestOutcome::Fallback`] and the HTTP layer decides what to show.

pub mod normalize;
pub mod samples;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::{CanonicalPin, Pin};
use crate::pinterest::{PinSource, UpstreamError};
use crate::store::PinStore;

pub use normalize::normalize;

pub const DEFAULT_LIMIT: u32 = 20;
/// Pinterest rejects larger page sizes.
pub const MAX_LIMIT: u32 = 250;

#[derive(Debug)]
pub enum IngestOutcome {
    /// Upstream answered; `pins` are the persisted records in upstream order.
    Ingested { count: usize, pins: Vec<Pin> },
    /// Upstream was unavailable; nothing was written.
    Fallback { reason: UpstreamError },
}

/// Page size from a raw `limit` query value. Never rejects: blank or
/// non-numeric input means the default, out-of-range numbers are clamped.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_LIMIT,
        Some(s) => match s.parse::<i64>() {
            Ok(n) => n.clamp(1, i64::from(MAX_LIMIT)) as u32,
            Err(_) => DEFAULT_LIMIT,
        },
    }
}

pub async fn ingest(
    source: &dyn PinSource,
    store: Arc<dyn PinStore>,
    query: &str,
    limit: u32,
) -> IngestOutcome {
    let raw_pins = match source.search(query, limit).await {
        Ok(raw_pins) => raw_pins,
        Err(reason) => {
            match &reason {
                UpstreamError::NotConfigured => {
                    warn!(query, "Pinterest access token not configured; serving sample data")
                }
                UpstreamError::RequestFailed { status, body } => tracing::error!(
                    query,
                    status = ?status,
                    body = %body,
                    "Pinterest API error; serving sample data"
                ),
            }
            return IngestOutcome::Fallback { reason };
        }
    };

    let ingested_at = Utc::now();
    let received = raw_pins.len();
    let normalized: Vec<CanonicalPin> = raw_pins
        .iter()
        .filter_map(|raw| normalize(raw, ingested_at))
        .collect();
    let dropped = received - normalized.len();
    if dropped > 0 {
        debug!(dropped, "Dropped pins without an id or displayable image");
    }

    let batch = collapse_duplicates(normalized);
    let batch_was_empty = batch.is_empty();

    // Detached so a client disconnect cannot cancel writes already under way.
    let pins = match tokio::spawn(persist_batch(store, batch)).await {
        Ok(pins) => pins,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            tracing::error!(error = %e, "Pin persistence task was cancelled");
            Vec::new()
        }
    };

    if pins.is_empty() && !batch_was_empty {
        tracing::error!(
            query,
            received,
            "No pins could be persisted; the store may be unavailable"
        );
    } else {
        info!(query, received, persisted = pins.len(), "Ingested Pinterest search results");
    }

    IngestOutcome::Ingested {
        count: pins.len(),
        pins,
    }
}

/// One entry per `pin_id`: the last occurrence's values, at the position of
/// the first occurrence.
fn collapse_duplicates(pins: Vec<CanonicalPin>) -> Vec<CanonicalPin> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(pins.len());
    let mut unique: Vec<CanonicalPin> = Vec::with_capacity(pins.len());

    for pin in pins {
        match positions.get(&pin.pin_id) {
            Some(&idx) => unique[idx] = pin,
            None => {
                positions.insert(pin.pin_id.clone(), unique.len());
                unique.push(pin);
            }
        }
    }

    unique
}

/// Upsert every pin concurrently. A failed write skips that pin only.
async fn persist_batch(store: Arc<dyn PinStore>, pins: Vec<CanonicalPin>) -> Vec<Pin> {
    let store = store.as_ref();
    let writes = pins.into_iter().map(|pin| async move {
        let pin_id = pin.pin_id.clone();
        match store.upsert(pin).await {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(pin_id = %pin_id, error = ?e, "Failed to persist pin; skipping");
                None
            }
        }
    });

    join_all(writes).await.into_iter().flatten().collect()
}
