//! Catalog API access.
//!
//! A [`CatalogApi`] knows how to fetch categories, VOD pages, serial
//! seasons/episodes, playlists and per-video descriptors from the service.
//! [`EpikaClient`] is the HTTP implementation; tests substitute their own.

pub mod epika;
pub mod types;

use async_trait::async_trait;

use crate::error::ApiResult;

pub use epika::EpikaClient;
pub use types::{
    Category, Episode, Playlist, ProductType, Season, VideoInfo, VideoType, VodItem, VodPage,
    VodQuery,
};

/// Read-only access to the streaming service's catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Subcategories (genres) of a main category.
    async fn categories(&self, main_category_id: u64) -> ApiResult<Vec<Category>>;

    /// One page of VOD products matching `query`.
    async fn vods(&self, query: &VodQuery) -> ApiResult<VodPage>;

    /// Seasons of a serial, in service order.
    async fn serial_seasons(&self, serial_id: u64) -> ApiResult<Vec<Season>>;

    /// Episodes of one season of a serial.
    async fn season_episodes(&self, serial_id: u64, season_id: u64) -> ApiResult<Vec<Episode>>;

    /// Stream sources, DRM endpoints and subtitles for a product.
    async fn playlist(&self, content_id: &str, video_type: VideoType) -> ApiResult<Playlist>;

    /// Descriptive metadata for a product.
    async fn video_info(&self, content_id: &str) -> ApiResult<VideoInfo>;
}
