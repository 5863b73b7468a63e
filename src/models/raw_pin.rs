use std::collections::HashMap;

use serde::Deserialize;

/// One pin as returned by the Pinterest API.
///
/// Every field is optional: the v5 API, the legacy v1 API and various
/// partial payloads disagree on where things live. The normalizer decides
/// which of these to trust.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPin {
    pub id: Option<RawId>,
    pub pin_id: Option<RawId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub link: Option<String>,
    pub created_at: Option<String>,
    /// v5: `media.images["1200x"].url`
    pub media: Option<RawMedia>,
    /// Older v5 payloads put the size map at the top level.
    pub images: Option<RawImageSet>,
    /// v1: `image.original.url`
    pub image: Option<RawImageSet>,
    pub image_url: Option<String>,
    pub board_owner: Option<RawBoardOwner>,
    pub board: Option<RawBoard>,
}

/// Pin identifiers are strings in v5 but were numbers in some legacy shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    /// `None` for an empty or whitespace-only string id.
    pub fn to_key(&self) -> Option<String> {
        match self {
            RawId::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawId::Number(n) => Some(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMedia {
    pub media_type: Option<String>,
    pub images: Option<RawImageSet>,
}

/// Map of size label (`"1200x"`, `"600x"`, `"original"`, ...) to image.
pub type RawImageSet = HashMap<String, RawImage>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawImage {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBoardOwner {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBoard {
    pub name: Option<String>,
}
