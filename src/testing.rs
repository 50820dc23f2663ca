//! In-memory [`CatalogApi`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::types::{
    Category, Episode, Playlist, Season, VideoInfo, VideoType, VodPage, VodQuery,
};
use crate::catalog::CatalogApi;
use crate::error::{ApiError, ApiResult};

/// Serves canned responses; anything not registered answers HTTP 404.
#[derive(Default)]
pub struct FakeCatalog {
    categories: HashMap<u64, Vec<Category>>,
    vods: Option<VodPage>,
    seasons: HashMap<u64, Vec<Season>>,
    episodes: HashMap<(u64, u64), Vec<Episode>>,
    playlists: HashMap<String, String>,
    video_info: HashMap<String, VideoInfo>,
    playlist_requests: Mutex<Vec<(String, VideoType)>>,
    vod_queries: Mutex<Vec<VodQuery>>,
    video_info_requests: Mutex<usize>,
}

fn not_found(path: &str) -> ApiError {
    ApiError::Status {
        url: format!("fake://{path}"),
        status: 404,
    }
}

impl FakeCatalog {
    pub fn with_categories(mut self, main_category_id: u64, json: &str) -> Self {
        let list = serde_json::from_str(json).expect("category fixture");
        self.categories.insert(main_category_id, list);
        self
    }

    pub fn with_vods(mut self, json: &str) -> Self {
        self.vods = Some(serde_json::from_str(json).expect("vod fixture"));
        self
    }

    pub fn with_seasons(mut self, serial_id: u64, json: &str) -> Self {
        let list = serde_json::from_str(json).expect("season fixture");
        self.seasons.insert(serial_id, list);
        self
    }

    pub fn with_episodes(mut self, serial_id: u64, season_id: u64, json: &str) -> Self {
        let list = serde_json::from_str(json).expect("episode fixture");
        self.episodes.insert((serial_id, season_id), list);
        self
    }

    /// Raw JSON so tests can also serve malformed playlists.
    pub fn with_playlist(mut self, content_id: &str, json: &str) -> Self {
        self.playlists
            .insert(content_id.to_string(), json.to_string());
        self
    }

    pub fn with_video_info(mut self, content_id: &str, info: VideoInfo) -> Self {
        self.video_info.insert(content_id.to_string(), info);
        self
    }

    pub fn playlist_requests(&self) -> Vec<(String, VideoType)> {
        self.playlist_requests.lock().unwrap().clone()
    }

    pub fn vod_queries(&self) -> Vec<VodQuery> {
        self.vod_queries.lock().unwrap().clone()
    }

    pub fn video_info_requests(&self) -> usize {
        *self.video_info_requests.lock().unwrap()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn categories(&self, main_category_id: u64) -> ApiResult<Vec<Category>> {
        self.categories
            .get(&main_category_id)
            .cloned()
            .ok_or_else(|| not_found("/items/categories"))
    }

    async fn vods(&self, query: &VodQuery) -> ApiResult<VodPage> {
        self.vod_queries.lock().unwrap().push(query.clone());
        self.vods.clone().ok_or_else(|| not_found("/products/vods"))
    }

    async fn serial_seasons(&self, serial_id: u64) -> ApiResult<Vec<Season>> {
        self.seasons
            .get(&serial_id)
            .cloned()
            .ok_or_else(|| not_found("/seasons"))
    }

    async fn season_episodes(&self, serial_id: u64, season_id: u64) -> ApiResult<Vec<Episode>> {
        self.episodes
            .get(&(serial_id, season_id))
            .cloned()
            .ok_or_else(|| not_found("/episodes"))
    }

    async fn playlist(&self, content_id: &str, video_type: VideoType) -> ApiResult<Playlist> {
        self.playlist_requests
            .lock()
            .unwrap()
            .push((content_id.to_string(), video_type));
        let path = format!("/products/{content_id}/videos/playlist");
        let json = self.playlists.get(content_id).ok_or_else(|| not_found(&path))?;
        serde_json::from_str(json).map_err(|source| ApiError::Decode {
            url: format!("fake://{path}"),
            source,
        })
    }

    async fn video_info(&self, content_id: &str) -> ApiResult<VideoInfo> {
        *self.video_info_requests.lock().unwrap() += 1;
        self.video_info
            .get(content_id)
            .cloned()
            .ok_or_else(|| not_found("/products/vods/{id}"))
    }
}
