//! LRT Epika catalog client (Redge product API).

use async_trait::async_trait;
use tracing::info;

use crate::catalog::types::{
    Category, Episode, ListBody, Playlist, Season, VideoInfo, VideoType, VodPage, VodQuery,
};
use crate::catalog::CatalogApi;
use crate::config::Config;
use crate::error::ApiResult;
use crate::http_client::ApiClient;

/// HTTP-backed [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct EpikaClient {
    http: ApiClient,
    tenant_uid: String,
    platform: String,
    lang: String,
}

impl EpikaClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = ApiClient::new(&config.base_url, config.timeout())?;
        Ok(Self {
            http,
            tenant_uid: config.tenant_uid.clone(),
            platform: config.platform.clone(),
            lang: config.lang.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// `lang` + `platform`, sent with every catalog call.
    fn locale_query(&self) -> Vec<(&'static str, String)> {
        vec![("lang", self.lang.clone()), ("platform", self.platform.clone())]
    }

    fn vods_query(&self, query: &VodQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("firstResult", query.first_result.to_string()),
            ("maxResults", query.max_results.to_string()),
        ];
        params.extend(
            query
                .main_category_ids
                .iter()
                .map(|id| ("mainCategoryId[]", id.to_string())),
        );
        params.extend(
            query
                .category_ids
                .iter()
                .map(|id| ("categoryId[]", id.to_string())),
        );
        params.extend(self.locale_query());
        params
    }

    fn playlist_query(&self, video_type: VideoType) -> Vec<(&'static str, String)> {
        vec![
            ("videoType", video_type.as_str().to_string()),
            ("platform", self.platform.clone()),
            ("tenantUid", self.tenant_uid.clone()),
        ]
    }
}

#[async_trait]
impl CatalogApi for EpikaClient {
    async fn categories(&self, main_category_id: u64) -> ApiResult<Vec<Category>> {
        let mut query = vec![("mainCategoryId", main_category_id.to_string())];
        query.extend(self.locale_query());
        let body: ListBody<Category> = self
            .http
            .get_json(&["items", "categories"], &query)
            .await?;
        Ok(body.into_vec())
    }

    async fn vods(&self, query: &VodQuery) -> ApiResult<VodPage> {
        let page: VodPage = self
            .http
            .get_json(&["products", "vods"], &self.vods_query(query))
            .await?;
        info!(items = page.items.len(), total = ?page.count, "VOD page fetched");
        Ok(page)
    }

    async fn serial_seasons(&self, serial_id: u64) -> ApiResult<Vec<Season>> {
        let serial = serial_id.to_string();
        let path = ["products", "vods", "serials", serial.as_str(), "seasons"];
        let body: ListBody<Season> = self.http.get_json(&path, &self.locale_query()).await?;
        Ok(body.into_vec())
    }

    async fn season_episodes(&self, serial_id: u64, season_id: u64) -> ApiResult<Vec<Episode>> {
        let (serial, season) = (serial_id.to_string(), season_id.to_string());
        let path = [
            "products",
            "vods",
            "serials",
            serial.as_str(),
            "seasons",
            season.as_str(),
            "episodes",
        ];
        let body: ListBody<Episode> = self.http.get_json(&path, &self.locale_query()).await?;
        Ok(body.into_vec())
    }

    async fn playlist(&self, content_id: &str, video_type: VideoType) -> ApiResult<Playlist> {
        let path = ["products", content_id, "videos", "playlist"];
        self.http
            .get_json(&path, &self.playlist_query(video_type))
            .await
    }

    async fn video_info(&self, content_id: &str) -> ApiResult<VideoInfo> {
        let path = ["products", "vods", content_id];
        self.http.get_json(&path, &self.locale_query()).await
    }
}
