//! `epika` - LRT Epika catalog browser and DRM playback resolver
//!
//! # Features
//!
//! - **Catalog**: main categories, genres, VOD pages, serial seasons and episodes
//! - **Playback**: DASH manifest selection, Widevine license templates, subtitles
//! - **Routing**: plugin-style paramstrings mapped onto typed actions
//!
//! # Example
//!
//! ```rust,no_run
//! use epika::{Config, EpikaClient, PlaybackResolver, VideoType};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let client = EpikaClient::new(&config)?;
//!     let playable = PlaybackResolver::from_config(&client, &config)
//!         .resolve("1234567", VideoType::Movie)
//!         .await?;
//!     println!("{}", playable.stream_url);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod http_client;
pub mod listing;
pub mod route;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CatalogApi, EpikaClient, VideoType};
pub use config::Config;
pub use error::{ApiError, ListingError, ResolveError, RouteError};
pub use listing::{Listing, MenuEntry};
pub use route::Action;
pub use stream::{PlaybackResolver, ResolvedPlayable};

/// Version of epika
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
