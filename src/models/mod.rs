pub mod raw_pin;

pub use raw_pin::{RawBoard, RawBoardOwner, RawId, RawImage, RawImageSet, RawMedia, RawPin};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Pin Models
// ============================================================================

/// A pin after normalization, independent of the upstream response shape.
/// This is what the ingestion pipeline hands to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPin {
    pub pin_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub board: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted pin row. `pin_id` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub pin_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub board: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pin {
    pub fn from_canonical(pin: CanonicalPin, updated_at: DateTime<Utc>) -> Self {
        Pin {
            pin_id: pin.pin_id,
            title: pin.title,
            description: pin.description,
            image_url: pin.image_url,
            link: pin.link,
            board: pin.board,
            created_at: pin.created_at,
            updated_at,
        }
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Body of `GET /api/pinterest/search` when live results were ingested.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub images: Vec<Pin>,
}

/// Body of `GET /api/pinterest/search` when the upstream was unavailable.
#[derive(Debug, Serialize)]
pub struct FallbackResponse {
    pub success: bool,
    pub message: String,
    pub images: Vec<CanonicalPin>,
}

#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub success: bool,
    pub images: Vec<Pin>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub success: bool,
    pub image: Pin,
}
