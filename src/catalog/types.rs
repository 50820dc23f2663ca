//! Serde records for the catalog API payloads.
//!
//! Every field the service may omit is an `Option`; decisions about what a
//! missing value means live in the resolver and the listings, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::stream::url::absolutize;

/// `videoType` parameter of the playlist endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoType {
    #[default]
    Movie,
    Trailer,
}

impl VideoType {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::Movie => "MOVIE",
            VideoType::Trailer => "TRAILER",
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MOVIE" => Ok(VideoType::Movie),
            "TRAILER" => Ok(VideoType::Trailer),
            other => Err(format!("unknown video type {other:?} (expected MOVIE or TRAILER)")),
        }
    }
}

/// Kind of a catalog product, from its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Movie,
    Serial,
    Season,
    Episode,
    #[default]
    #[serde(other)]
    Other,
}

// ─── Playlist ────────────────────────────────────────────────────────────────

/// Response of `GET /products/{id}/videos/playlist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Playlist {
    pub sources: Option<PlaylistSources>,
    pub drm: Option<DrmSystems>,
    pub subtitles: Option<Vec<SubtitleTrack>>,
}

/// Stream sources keyed by transport. Unknown transports are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistSources {
    #[serde(rename = "DASH")]
    pub dash: Option<Vec<SourceDescriptor>>,
    #[serde(rename = "HLS")]
    pub hls: Option<Vec<SourceDescriptor>>,
    #[serde(rename = "MP4")]
    pub mp4: Option<Vec<SourceDescriptor>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDescriptor {
    /// Manifest URL, often protocol-relative.
    pub src: Option<String>,
}

/// License endpoints keyed by DRM scheme.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrmSystems {
    #[serde(rename = "WIDEVINE")]
    pub widevine: Option<DrmDescriptor>,
    #[serde(rename = "PLAYREADY")]
    pub playready: Option<DrmDescriptor>,
    #[serde(rename = "FAIRPLAY")]
    pub fairplay: Option<DrmDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrmDescriptor {
    /// License server URL, often protocol-relative.
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleTrack {
    pub url: Option<String>,
    pub language: Option<String>,
    pub label: Option<String>,
}

// ─── Video info ──────────────────────────────────────────────────────────────

/// Response of `GET /products/vods/{id}`; only the descriptive fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lead: Option<String>,
    /// Seconds.
    pub duration: Option<u64>,
    pub year: Option<i32>,
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// Entry of `GET /items/categories`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub seo_name: Option<String>,
    pub seo_name_singular: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainCategory {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

/// Artwork lists by aspect ratio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    #[serde(rename = "16x9")]
    pub landscape: Option<Vec<Image>>,
    #[serde(rename = "1x1")]
    pub square: Option<Vec<Image>>,
    #[serde(rename = "3x4")]
    pub portrait: Option<Vec<Image>>,
}

impl Images {
    /// Absolute URL of the preferred poster: first 16x9, then 3x4, then 1x1.
    pub fn poster(&self) -> Option<String> {
        [&self.landscape, &self.portrait, &self.square]
            .into_iter()
            .flatten()
            .find_map(|list| {
                list.first()
                    .and_then(|img| img.url.as_deref())
                    .filter(|url| !url.is_empty())
            })
            .map(absolutize)
    }
}

/// Item of a `GET /products/vods` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VodItem {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: ProductType,
    pub title: String,
    pub lead: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<u64>,
    pub images: Option<Images>,
    pub main_category: Option<MainCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VodPage {
    #[serde(default)]
    pub items: Vec<VodItem>,
    pub count: Option<u64>,
}

/// Filter for `GET /products/vods`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VodQuery {
    pub first_result: u32,
    pub max_results: u32,
    pub main_category_ids: Vec<u64>,
    pub category_ids: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub id: u64,
    pub title: Option<String>,
    pub number: Option<u32>,
}

impl Season {
    pub fn label(&self) -> String {
        match (&self.title, self.number) {
            (Some(title), _) if !title.is_empty() => title.clone(),
            (_, Some(n)) => format!("Season {n}"),
            _ => format!("Season {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub title: String,
    pub lead: Option<String>,
    pub episode: Option<u32>,
    pub duration: Option<u64>,
    pub images: Option<Images>,
}

/// Some list endpoints answer with a bare array, others wrap it in `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Paged { items: Vec<T> },
}

impl<T> ListBody<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Paged { items } => items,
        }
    }
}
