//! Playback resolution: playlist -> DASH manifest + Widevine license template.
//!
//! Selection rules:
//! - only `sources.DASH[0]` is considered; HLS/MP4 are never a fallback
//! - DRM is Widevine or nothing; a missing license URL is logged, not fatal
//! - the license body placeholder `R{SSM}` is left for the player to fill in

use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogApi, Playlist, VideoType};
use crate::config::Config;
use crate::error::ResolveError;
use crate::stream::playable::{DrmScheme, Metadata, ResolvedPlayable, Transport};
use crate::stream::url::absolutize_opt;

/// Headers segment of every license request.
pub const LICENSE_CONTENT_TYPE: &str = "Content-Type=application/octet-stream";

/// Placeholder the DRM subsystem replaces with the base64 session message.
pub const SESSION_MESSAGE_TOKEN: &str = "R{SSM}";

/// Build the `url|headers|body|response` license key.
///
/// The cookie is appended verbatim, without escaping.
pub fn license_key(license_url: &str, cookie: Option<&str>) -> String {
    let mut headers = LICENSE_CONTENT_TYPE.to_string();
    if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
        headers.push_str("&Cookie=");
        headers.push_str(cookie);
    }
    format!("{license_url}|{headers}|{SESSION_MESSAGE_TOKEN}|")
}

/// Apply the transport, DRM and subtitle rules to an already fetched
/// playlist. The result carries no metadata.
pub fn resolve_playlist(
    content_id: &str,
    playlist: &Playlist,
    cookie: Option<&str>,
) -> Result<ResolvedPlayable, ResolveError> {
    let stream_url = playlist
        .sources
        .as_ref()
        .and_then(|s| s.dash.as_ref())
        .and_then(|dash| dash.first())
        .and_then(|source| absolutize_opt(source.src.as_deref()))
        .ok_or_else(|| ResolveError::NoStreamAvailable {
            content_id: content_id.to_string(),
        })?;
    info!(url = %stream_url, "DASH stream selected");

    let license_url = playlist
        .drm
        .as_ref()
        .and_then(|drm| drm.widevine.as_ref())
        .and_then(|wv| absolutize_opt(wv.src.as_deref()));

    let (drm, license_key) = match &license_url {
        Some(url) => {
            info!(url = %url, cookie = cookie.is_some(), "License key configured");
            (Some(DrmScheme::Widevine), Some(license_key(url, cookie)))
        }
        None => {
            warn!(content_id, "No DRM license URL found, playing without DRM");
            (None, None)
        }
    };

    let subtitles: Vec<String> = playlist
        .subtitles
        .iter()
        .flatten()
        .filter_map(|track| absolutize_opt(track.url.as_deref()))
        .collect();
    if !subtitles.is_empty() {
        info!(count = subtitles.len(), "Added subtitle(s)");
    }

    Ok(ResolvedPlayable {
        content_id: content_id.to_string(),
        stream_url,
        transport: Transport::Dash,
        drm,
        license_url,
        license_key,
        subtitles,
        metadata: None,
    })
}

/// Resolves content ids into [`ResolvedPlayable`]s against a catalog.
///
/// Holds no state between calls; resolving the same id twice against an
/// unchanged playlist yields the same result.
pub struct PlaybackResolver<'a> {
    api: &'a dyn CatalogApi,
    cookie: Option<String>,
    fetch_metadata: bool,
}

impl<'a> PlaybackResolver<'a> {
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self {
            api,
            cookie: None,
            fetch_metadata: true,
        }
    }

    /// Resolver using the cookie and metadata settings of `config`.
    pub fn from_config(api: &'a dyn CatalogApi, config: &Config) -> Self {
        Self::new(api)
            .with_cookie(config.license_cookie().map(str::to_string))
            .with_metadata(config.fetch_metadata)
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.fetch_metadata = enabled;
        self
    }

    /// Fetch the playlist for `content_id` and turn it into a playable.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        content_id: &str,
        video_type: VideoType,
    ) -> Result<ResolvedPlayable, ResolveError> {
        if content_id.trim().is_empty() {
            return Err(ResolveError::EmptyContentId);
        }
        info!("Attempting to play video {content_id}");

        let playlist = self
            .api
            .playlist(content_id, video_type)
            .await
            .map_err(|source| ResolveError::PlaylistUnavailable {
                content_id: content_id.to_string(),
                source,
            })?;

        let mut playable = resolve_playlist(content_id, &playlist, self.cookie.as_deref())?;

        if self.fetch_metadata {
            match self.metadata(content_id).await {
                Ok(metadata) => playable.metadata = Some(metadata),
                Err(e) => warn!(error = %e, "Continuing without video metadata"),
            }
        } else {
            debug!("Metadata lookup disabled");
        }

        Ok(playable)
    }

    async fn metadata(&self, content_id: &str) -> Result<Metadata, ResolveError> {
        self.api
            .video_info(content_id)
            .await
            .map(Metadata::from)
            .map_err(|source| ResolveError::MetadataUnavailable {
                content_id: content_id.to_string(),
                source,
            })
    }
}
