use chrono::{DateTime, Utc};

use crate::models::CanonicalPin;
use crate::pinterest::UpstreamError;

/// Human-readable explanation shown next to the sample pins.
pub fn fallback_message(reason: &UpstreamError) -> &'static str {
    match reason {
        UpstreamError::NotConfigured => {
            "Using sample data. Pinterest access token is not configured."
        }
        UpstreamError::RequestFailed { .. } => {
            "Using sample data. API limit reached or token invalid."
        }
    }
}

/// Placeholder pins returned when live search is unavailable, so the grid
/// always has something to render. Never persisted.
pub fn sample_pins(now: DateTime<Utc>) -> Vec<CanonicalPin> {
    vec![
        CanonicalPin {
            pin_id: "sample1".into(),
            title: "Sample: Mountain View".into(),
            description:
                "This is a sample image because the Pinterest API returned no results or failed."
                    .into(),
            image_url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=564"
                .into(),
            link: "#".into(),
            board: "Sample Board".into(),
            created_at: now,
        },
        CanonicalPin {
            pin_id: "sample2".into(),
            title: "Sample: Forest Path".into(),
            description: "Please add pins to your Pinterest account to see them appear in search."
                .into(),
            image_url: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=564"
                .into(),
            link: "#".into(),
            board: "Sample Board".into(),
            created_at: now,
        },
        CanonicalPin {
            pin_id: "sample3".into(),
            title: "Sample: Ocean View".into(),
            description: "Add pins to your Pinterest account to see them here.".into(),
            image_url: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=564"
                .into(),
            link: "#".into(),
            board: "Sample Board".into(),
            created_at: now,
        },
    ]
}
