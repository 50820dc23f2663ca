//! Menu listings: the fixed browse hierarchy built from catalog calls.
//!
//! ```text
//! root (Filmai, Serialai)
//!  └─ subcategories        action=categories
//!      └─ videos            action=listing
//!          ├─ movie         action=play       (playable)
//!          └─ serial        action=serial
//!              └─ seasons
//!                  └─ episodes   action=episodes -> action=play
//! ```
//!
//! A failed or empty fetch comes back as [`ListingError`]; callers notify
//! the user and show an empty listing.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{CatalogApi, Episode, ProductType, Season, VodItem, VodQuery};
use crate::config::Config;
use crate::error::{ApiError, ListingError};
use crate::route::Action;

/// Main categories shown at the root. The service has no endpoint for them.
pub const MAIN_CATEGORIES: [(u64, &str); 2] = [(268, "Filmai"), (304, "Serialai")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Opens another listing.
    Folder,
    /// Resolves to a stream.
    Playable,
}

/// One row of a listing, carrying the action that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub action: Action,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl MenuEntry {
    fn folder(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            kind: EntryKind::Folder,
            poster: None,
            plot: None,
            year: None,
            genres: Vec::new(),
            duration: None,
        }
    }

    fn playable(label: impl Into<String>, action: Action) -> Self {
        Self {
            kind: EntryKind::Playable,
            ..Self::folder(label, action)
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// A folder's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl Listing {
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }
}

fn unavailable(what: &'static str) -> impl FnOnce(ApiError) -> ListingError {
    move |source| {
        warn!(error = %source, "Failed to get {what}");
        ListingError::Unavailable { what, source }
    }
}

fn non_empty(listing: Listing, what: &'static str) -> Result<Listing, ListingError> {
    if listing.entries.is_empty() {
        info!("No {what} found");
        Err(ListingError::Empty { what })
    } else {
        Ok(listing)
    }
}

/// The fixed root menu.
pub fn root() -> Listing {
    let entries = MAIN_CATEGORIES
        .iter()
        .map(|&(id, name)| {
            let mut entry = MenuEntry::folder(name, Action::Categories { category: id });
            entry.genres = vec![name.to_string()];
            entry
        })
        .collect();
    Listing {
        title: "LRT Epika".to_string(),
        entries,
    }
}

/// Subcategories of a main category.
pub async fn subcategories(
    api: &dyn CatalogApi,
    category: u64,
) -> Result<Listing, ListingError> {
    let categories = api
        .categories(category)
        .await
        .map_err(unavailable("sub-categories"))?;

    let entries = categories
        .into_iter()
        .map(|sub| {
            let mut entry = MenuEntry::folder(
                &sub.name,
                Action::Listing {
                    category,
                    subcategory: sub.id,
                },
            );
            entry.genres = vec![sub.name];
            entry
        })
        .collect();

    non_empty(
        Listing {
            title: main_category_name(category),
            entries,
        },
        "sub-categories",
    )
}

/// Videos of a subcategory: movies are playable, everything else opens
/// as a serial.
pub async fn videos(
    api: &dyn CatalogApi,
    config: &Config,
    category: u64,
    subcategory: u64,
) -> Result<Listing, ListingError> {
    let query = VodQuery {
        first_result: 0,
        max_results: config.max_results,
        main_category_ids: vec![category],
        category_ids: vec![subcategory],
    };
    let page = api.vods(&query).await.map_err(unavailable("videos"))?;

    let entries = page
        .items
        .into_iter()
        .map(|item| vod_entry(item, category, subcategory))
        .collect();

    non_empty(
        Listing {
            title: main_category_name(category),
            entries,
        },
        "videos",
    )
}

fn vod_entry(item: VodItem, category: u64, subcategory: u64) -> MenuEntry {
    let mut entry = if item.kind == ProductType::Movie {
        MenuEntry::playable(
            &item.title,
            Action::Play {
                video: item.id.to_string(),
            },
        )
    } else {
        MenuEntry::folder(
            &item.title,
            Action::Serial {
                category,
                subcategory,
                video_id: item.id,
            },
        )
    };
    entry.poster = item.images.as_ref().and_then(|images| images.poster());
    entry.plot = item.lead.filter(|l| !l.is_empty());
    entry.year = item.year;
    entry.genres = item.main_category.map(|c| vec![c.name]).unwrap_or_default();
    entry.duration = item.duration;
    entry
}

/// Seasons of a serial.
pub async fn seasons(api: &dyn CatalogApi, serial_id: u64) -> Result<Listing, ListingError> {
    let seasons = api
        .serial_seasons(serial_id)
        .await
        .map_err(unavailable("series info"))?;

    let entries = seasons.iter().map(|s| season_entry(s, serial_id)).collect();

    non_empty(
        Listing {
            title: "Seasons".to_string(),
            entries,
        },
        "seasons",
    )
}

fn season_entry(season: &Season, serial_id: u64) -> MenuEntry {
    MenuEntry::folder(
        season.label(),
        Action::Episodes {
            serial_id,
            season_id: season.id,
        },
    )
}

/// Episodes of one season; all playable.
pub async fn episodes(
    api: &dyn CatalogApi,
    serial_id: u64,
    season_id: u64,
) -> Result<Listing, ListingError> {
    let episodes = api
        .season_episodes(serial_id, season_id)
        .await
        .map_err(unavailable("episodes"))?;

    let entries = episodes.into_iter().map(episode_entry).collect();

    non_empty(
        Listing {
            title: "Episodes".to_string(),
            entries,
        },
        "episodes",
    )
}

fn episode_entry(episode: Episode) -> MenuEntry {
    let label = match episode.episode {
        Some(n) => format!("{n}. {}", episode.title),
        None => episode.title,
    };
    let mut entry = MenuEntry::playable(
        label,
        Action::Play {
            video: episode.id.to_string(),
        },
    );
    entry.poster = episode.images.as_ref().and_then(|images| images.poster());
    entry.plot = episode.lead.filter(|l| !l.is_empty());
    entry.duration = episode.duration;
    entry
}

fn main_category_name(id: u64) -> String {
    MAIN_CATEGORIES
        .iter()
        .find(|(main_id, _)| *main_id == id)
        .map_or_else(|| format!("Category {id}"), |(_, name)| (*name).to_string())
}
