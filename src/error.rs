//! Error types shared by the catalog client, the resolver and the listings.
//!
//! Every failure is returned as a typed value; presenting it (a toast in a
//! media center, a line on stderr in the CLI) is the caller's business.

use thiserror::Error;

/// Failure talking to the upstream REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL {0:?}")]
    BaseUrl(String),

    #[error("invalid path segment {0:?}")]
    PathSegment(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Outcome of a failed playback resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("content id must not be empty")]
    EmptyContentId,

    /// The playlist could not be fetched or parsed. Fatal for the request.
    #[error("failed to get stream information for {content_id}")]
    PlaylistUnavailable {
        content_id: String,
        #[source]
        source: ApiError,
    },

    /// The playlist has no DASH source. Fatal for the request.
    #[error("no DASH stream available for {content_id}")]
    NoStreamAvailable { content_id: String },

    /// Descriptive metadata could not be fetched. Never returned from
    /// `resolve`; only logged.
    #[error("metadata unavailable for {content_id}")]
    MetadataUnavailable {
        content_id: String,
        #[source]
        source: ApiError,
    },
}

impl ResolveError {
    /// Short message suitable for a user-facing notification.
    pub fn notification(&self) -> &'static str {
        match self {
            ResolveError::EmptyContentId => "Nothing to play",
            ResolveError::PlaylistUnavailable { .. } => "Failed to get stream information",
            ResolveError::NoStreamAvailable { .. } => "No DASH stream available",
            ResolveError::MetadataUnavailable { .. } => "Video information unavailable",
        }
    }
}

/// Failure or empty result while building a menu listing.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("failed to get {what}")]
    Unavailable {
        what: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("no {what} found")]
    Empty { what: &'static str },
}

impl ListingError {
    /// Notification text, matching what a media-center addon would toast.
    pub fn notification(&self) -> String {
        match self {
            ListingError::Unavailable { what, .. } => format!("Failed to get {what}"),
            ListingError::Empty { what } => format!("No {what} found"),
        }
    }

    /// `true` for failures, `false` for merely empty results.
    pub fn is_failure(&self) -> bool {
        matches!(self, ListingError::Unavailable { .. })
    }
}

/// A plugin paramstring that does not name a supported action.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid paramstring: {0}!")]
    UnknownAction(String),

    #[error("Invalid paramstring: {paramstring}! missing parameter {name:?}")]
    MissingParam {
        paramstring: String,
        name: &'static str,
    },

    #[error("Invalid paramstring: {paramstring}! parameter {name:?} is not an id: {value:?}")]
    InvalidId {
        paramstring: String,
        name: &'static str,
        value: String,
    },
}

/// Configuration file could not be read or parsed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid base_url {0:?}: must be an absolute http(s) URL")]
    BaseUrl(String),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}
