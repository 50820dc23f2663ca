//! Client configuration loaded from `~/.config/epika/config.toml`.
//!
//! ```toml
//! base_url = "https://epika.lrt.lt/api"
//! tenant_uid = "Lh8t"
//! platform = "BROWSER"
//! lang = "LIT"
//! cookies = "sessionid=abc; consent=1"
//! timeout_secs = 10
//! fetch_metadata = true
//! max_results = 100
//! ```
//!
//! Every key is optional. The `EPIKA_COOKIES` environment variable
//! overrides `cookies`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://epika.lrt.lt/api";
pub const DEFAULT_TENANT_UID: &str = "Lh8t";
pub const DEFAULT_PLATFORM: &str = "BROWSER";
pub const DEFAULT_LANG: &str = "LIT";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RESULTS: u32 = 100;

/// Environment variable that overrides the configured cookie string.
pub const COOKIES_ENV: &str = "EPIKA_COOKIES";

/// Everything the catalog client and the resolver need to know about the
/// service and the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Tenant identifier sent with playlist requests.
    pub tenant_uid: String,
    /// Platform identifier (`BROWSER`, `ANDROID_TV`, ...).
    pub platform: String,
    /// Catalog language code.
    pub lang: String,
    /// Cookie string appended verbatim to Widevine license requests.
    pub cookies: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Whether `play` looks up title/description/duration.
    pub fetch_metadata: bool,
    /// Page size for VOD listings.
    pub max_results: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_uid: DEFAULT_TENANT_UID.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            lang: DEFAULT_LANG.to_string(),
            cookies: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fetch_metadata: true,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist, then apply the environment override.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path and validate. A missing file yields
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.normalize()?;
        Ok(config)
    }

    /// File contents plus the environment override, not yet validated.
    /// Callers layering further overrides run [`Config::normalize`] last.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml(&content).map_err(|source| ConfigError::Toml {
                path: path.display().to_string(),
                source,
            })?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Ok(cookies) = std::env::var(COOKIES_ENV) {
            config.cookies = Some(cookies);
        }
        Ok(config)
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Trim the base URL, drop empty cookie strings and reject a zero
    /// timeout.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let trimmed = self.base_url.trim().trim_end_matches('/');
        let parsed =
            url::Url::parse(trimmed).map_err(|_| ConfigError::BaseUrl(self.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        self.base_url = trimmed.to_string();

        if self.cookies.as_deref().is_some_and(|c| c.trim().is_empty()) {
            self.cookies = None;
        }
        Ok(())
    }

    /// The license cookie, if one is configured.
    pub fn license_cookie(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("epika")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
lang = "ENG"
cookies = "a=1; b=2"
timeout_secs = 5
"#;
        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.lang, "ENG");
        assert_eq!(config.license_cookie(), Some("a=1; b=2"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn normalize_trims_base_url_and_blank_cookie() {
        let mut config = Config {
            base_url: "https://example.test/api/".into(),
            cookies: Some("   ".into()),
            ..Config::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.base_url, "https://example.test/api");
        assert_eq!(config.license_cookie(), None);
    }

    #[test]
    fn normalize_rejects_non_http_base_url() {
        let mut config = Config {
            base_url: "ftp://example.test".into(),
            ..Config::default()
        };
        assert!(matches!(config.normalize(), Err(ConfigError::BaseUrl(_))));

        let mut config = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.normalize().is_err());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("epika-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "timeout_secs = \"ten\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn normalize_rejects_zero_timeout() {
        let mut config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.normalize(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn read_defers_validation_to_normalize() {
        let dir = std::env::temp_dir().join(format!("epika-read-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "base_url = \"ftp://old.example\"\ntimeout_secs = 0").unwrap();

        assert!(Config::load_from(&path).is_err());

        let mut config = Config::read(&path).unwrap();
        assert_eq!(config.base_url, "ftp://old.example");
        config.base_url = "http://127.0.0.1:8080/api/".into();
        config.timeout_secs = 3;
        config.normalize().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
