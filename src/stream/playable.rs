//! The resolved, host-ready description of something to play.

use serde::Serialize;

use crate::catalog::VideoInfo;

/// Stream transport. Only DASH is accepted because it is the one the DRM
/// path supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Dash,
}

impl Transport {
    /// Manifest type understood by adaptive-stream players.
    pub fn manifest_type(self) -> &'static str {
        match self {
            Transport::Dash => "mpd",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Transport::Dash => "application/dash+xml",
        }
    }
}

/// DRM scheme protecting the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrmScheme {
    Widevine,
}

impl DrmScheme {
    /// EME key system identifier.
    pub fn key_system(self) -> &'static str {
        match self {
            DrmScheme::Widevine => "com.widevine.alpha",
        }
    }
}

/// Descriptive metadata merged into a [`ResolvedPlayable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: Option<String>,
    /// Seconds.
    pub duration: Option<u64>,
    pub year: Option<i32>,
}

impl From<VideoInfo> for Metadata {
    fn from(info: VideoInfo) -> Self {
        Self {
            title: info
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            description: info.description.filter(|d| !d.is_empty()).or(info.lead),
            duration: info.duration,
            year: info.year,
        }
    }
}

/// Everything a player needs to start a (possibly DRM-protected) stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlayable {
    pub content_id: String,
    /// Absolute manifest URL.
    pub stream_url: String,
    pub transport: Transport,
    /// `None` for clear streams.
    pub drm: Option<DrmScheme>,
    /// Absolute license server URL, when DRM is in use.
    pub license_url: Option<String>,
    /// `url|headers|body|response` template; the body stays `R{SSM}`.
    pub license_key: Option<String>,
    /// Absolute subtitle URLs in playlist order.
    pub subtitles: Vec<String>,
    pub metadata: Option<Metadata>,
}

impl ResolvedPlayable {
    pub fn is_protected(&self) -> bool {
        self.drm.is_some()
    }

    /// Properties for an `inputstream.adaptive`-style player, in the order
    /// a host would set them.
    pub fn player_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("inputstream", "inputstream.adaptive".to_string()),
            (
                "inputstream.adaptive.manifest_type",
                self.transport.manifest_type().to_string(),
            ),
        ];
        if let (Some(drm), Some(key)) = (self.drm, &self.license_key) {
            props.push(("inputstream.adaptive.license_type", drm.key_system().to_string()));
            props.push(("inputstream.adaptive.license_key", key.clone()));
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playable(license_key: Option<&str>) -> ResolvedPlayable {
        ResolvedPlayable {
            content_id: "1".into(),
            stream_url: "https://cdn/a.mpd".into(),
            transport: Transport::Dash,
            drm: license_key.map(|_| DrmScheme::Widevine),
            license_url: license_key.map(|_| "https://lic/k".to_string()),
            license_key: license_key.map(str::to_string),
            subtitles: vec![],
            metadata: None,
        }
    }

    #[test]
    fn clear_stream_properties() {
        let props = playable(None).player_properties();
        assert_eq!(props.len(), 2);
        assert_eq!(props[1], ("inputstream.adaptive.manifest_type", "mpd".to_string()));
    }

    #[test]
    fn protected_stream_properties() {
        let p = playable(Some("https://lic/k|Content-Type=application/octet-stream|R{SSM}|"));
        assert!(p.is_protected());
        let props = p.player_properties();
        assert_eq!(
            props[2],
            ("inputstream.adaptive.license_type", "com.widevine.alpha".to_string())
        );
        assert!(props[3].1.ends_with("|R{SSM}|"));
    }

    #[test]
    fn metadata_defaults() {
        let meta = Metadata::from(VideoInfo {
            title: None,
            description: Some(String::new()),
            lead: Some("Short lead".into()),
            duration: Some(5400),
            year: None,
        });
        assert_eq!(meta.title, "Unknown");
        assert_eq!(meta.description.as_deref(), Some("Short lead"));
        assert_eq!(meta.duration, Some(5400));
    }

    #[test]
    fn serializes_lowercase_enums() {
        let json = serde_json::to_value(playable(Some("k"))).unwrap();
        assert_eq!(json["transport"], "dash");
        assert_eq!(json["drm"], "widevine");
        assert!(json["metadata"].is_null());
    }
}
