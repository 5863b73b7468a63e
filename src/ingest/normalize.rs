//! Raw Pinterest payload → [`CanonicalPin`].
//!
//! Pure functions only. The ingestion time is passed in rather than read from
//! the clock so that the same input always produces the same output.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::{CanonicalPin, RawImageSet, RawPin};

pub const UNTITLED: &str = "Untitled";
pub const PIN_URL_PREFIX: &str = "https://www.pinterest.com/pin/";

/// Size variants, most preferred first.
pub const IMAGE_SIZES: &[&str] = &["1200x", "600x", "400x300", "originals", "150x150"];

/// One place an image URL may live in a raw pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `media.images[size].url` (v5)
    MediaImages(&'static str),
    /// `images[size].url`
    TopLevelImages(&'static str),
    /// `image.original.url` (v1)
    LegacyOriginal,
    /// `image_url`
    FlatUrl,
}

impl ImageSource {
    pub fn extract<'a>(&self, raw: &'a RawPin) -> Option<&'a str> {
        match self {
            ImageSource::MediaImages(size) => raw
                .media
                .as_ref()
                .and_then(|m| m.images.as_ref())
                .and_then(|images| sized_url(images, size)),
            ImageSource::TopLevelImages(size) => {
                raw.images.as_ref().and_then(|images| sized_url(images, size))
            }
            ImageSource::LegacyOriginal => raw
                .image
                .as_ref()
                .and_then(|images| sized_url(images, "original")),
            ImageSource::FlatUrl => non_empty(raw.image_url.as_deref()),
        }
    }
}

/// Every image location in the order they are tried.
pub fn image_strategies() -> Vec<ImageSource> {
    IMAGE_SIZES
        .iter()
        .copied()
        .map(ImageSource::MediaImages)
        .chain(IMAGE_SIZES.iter().copied().map(ImageSource::TopLevelImages))
        .chain([ImageSource::LegacyOriginal, ImageSource::FlatUrl])
        .collect()
}

fn sized_url<'a>(images: &'a RawImageSet, size: &str) -> Option<&'a str> {
    images.get(size).and_then(|img| non_empty(img.url.as_deref()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

pub fn extract_pin_id(raw: &RawPin) -> Option<String> {
    [raw.id.as_ref(), raw.pin_id.as_ref()]
        .into_iter()
        .flatten()
        .find_map(|id| id.to_key())
}

pub fn extract_image_url(raw: &RawPin) -> Option<String> {
    image_strategies()
        .iter()
        .find_map(|source| source.extract(raw))
        .map(str::to_string)
}

/// Accepts RFC 3339 and the zone-less `2022-03-01T10:00:00` form the v5 API
/// returns, which is UTC.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Returns `None` when the pin has no identifier or no displayable image;
/// such pins are never persisted.
pub fn normalize(raw: &RawPin, ingested_at: DateTime<Utc>) -> Option<CanonicalPin> {
    let pin_id = extract_pin_id(raw)?;
    let image_url = extract_image_url(raw)?;

    let title = non_empty(raw.title.as_deref())
        .or_else(|| non_empty(raw.description.as_deref()))
        .unwrap_or(UNTITLED)
        .to_string();

    let description = non_empty(raw.description.as_deref())
        .or_else(|| non_empty(raw.alt_text.as_deref()))
        .unwrap_or_default()
        .to_string();

    let link = non_empty(raw.link.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{PIN_URL_PREFIX}{pin_id}/"));

    let board = raw
        .board_owner
        .as_ref()
        .and_then(|owner| non_empty(owner.username.as_deref()))
        .or_else(|| {
            raw.board
                .as_ref()
                .and_then(|board| non_empty(board.name.as_deref()))
        })
        .unwrap_or_default()
        .to_string();

    let created_at = raw
        .created_at
        .as_deref()
        .and_then(parse_created_at)
        .unwrap_or(ingested_at);

    Some(CanonicalPin {
        pin_id,
        title,
        description,
        image_url,
        link,
        board,
        created_at,
    })
}
