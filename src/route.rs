//! Plugin-style paramstrings (`action=listing&category=268&subcategory=5`).
//!
//! Each process invocation handles one [`Action`]. An empty paramstring is
//! the root menu; anything unrecognised is an error, never a silent no-op.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::error::RouteError;

/// One navigation or playback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Main categories.
    Root,
    /// Subcategories of a main category.
    Categories { category: u64 },
    /// Videos of a subcategory.
    Listing { category: u64, subcategory: u64 },
    /// Seasons of a serial found in a listing.
    Serial {
        category: u64,
        subcategory: u64,
        video_id: u64,
    },
    /// Episodes of one season.
    Episodes { serial_id: u64, season_id: u64 },
    /// Resolve and play.
    Play { video: String },
}

struct Params<'a> {
    raw: &'a str,
    map: HashMap<String, String>,
}

impl<'a> Params<'a> {
    fn parse(raw: &'a str) -> Self {
        let map = form_urlencoded::parse(raw.as_bytes()).into_owned().collect();
        Self { raw, map }
    }

    fn str(&self, name: &'static str) -> Result<&str, RouteError> {
        self.map
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RouteError::MissingParam {
                paramstring: self.raw.to_string(),
                name,
            })
    }

    fn id(&self, name: &'static str) -> Result<u64, RouteError> {
        let value = self.str(name)?;
        value.trim().parse().map_err(|_| RouteError::InvalidId {
            paramstring: self.raw.to_string(),
            name,
            value: value.to_string(),
        })
    }
}

impl Action {
    /// Parse a paramstring; a leading `?` is ignored.
    pub fn parse(paramstring: &str) -> Result<Self, RouteError> {
        let raw = paramstring.strip_prefix('?').unwrap_or(paramstring);
        let params = Params::parse(raw);
        if params.map.is_empty() {
            return Ok(Action::Root);
        }

        let action = params
            .map
            .get("action")
            .ok_or_else(|| RouteError::UnknownAction(raw.to_string()))?;

        match action.as_str() {
            "categories" => Ok(Action::Categories {
                category: params.id("category")?,
            }),
            "listing" => Ok(Action::Listing {
                category: params.id("category")?,
                subcategory: params.id("subcategory")?,
            }),
            "serial" => Ok(Action::Serial {
                category: params.id("category")?,
                subcategory: params.id("subcategory")?,
                video_id: params.id("video_id")?,
            }),
            "episodes" => Ok(Action::Episodes {
                serial_id: params.id("serial_id")?,
                season_id: params.id("season_id")?,
            }),
            "play" => Ok(Action::Play {
                video: params.str("video")?.to_string(),
            }),
            _ => Err(RouteError::UnknownAction(raw.to_string())),
        }
    }

    /// Inverse of [`Action::parse`].
    pub fn to_query(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        match self {
            Action::Root => {}
            Action::Categories { category } => {
                out.append_pair("action", "categories")
                    .append_pair("category", &category.to_string());
            }
            Action::Listing {
                category,
                subcategory,
            } => {
                out.append_pair("action", "listing")
                    .append_pair("category", &category.to_string())
                    .append_pair("subcategory", &subcategory.to_string());
            }
            Action::Serial {
                category,
                subcategory,
                video_id,
            } => {
                out.append_pair("action", "serial")
                    .append_pair("category", &category.to_string())
                    .append_pair("subcategory", &subcategory.to_string())
                    .append_pair("video_id", &video_id.to_string());
            }
            Action::Episodes {
                serial_id,
                season_id,
            } => {
                out.append_pair("action", "episodes")
                    .append_pair("serial_id", &serial_id.to_string())
                    .append_pair("season_id", &season_id.to_string());
            }
            Action::Play { video } => {
                out.append_pair("action", "play").append_pair("video", video);
            }
        }
        out.finish()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Root => f.write_str("root"),
            other => f.write_str(&other.to_query()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_root() {
        assert_eq!(Action::parse("").unwrap(), Action::Root);
        assert_eq!(Action::parse("?").unwrap(), Action::Root);
    }

    #[test]
    fn parses_every_action() {
        assert_eq!(
            Action::parse("?action=categories&category=268").unwrap(),
            Action::Categories { category: 268 }
        );
        assert_eq!(
            Action::parse("action=listing&category=268&subcategory=12").unwrap(),
            Action::Listing {
                category: 268,
                subcategory: 12
            }
        );
        assert_eq!(
            Action::parse("action=serial&category=304&subcategory=3&video_id=99").unwrap(),
            Action::Serial {
                category: 304,
                subcategory: 3,
                video_id: 99
            }
        );
        assert_eq!(
            Action::parse("action=episodes&serial_id=99&season_id=100").unwrap(),
            Action::Episodes {
                serial_id: 99,
                season_id: 100
            }
        );
        assert_eq!(
            Action::parse("action=play&video=12345").unwrap(),
            Action::Play {
                video: "12345".into()
            }
        );
    }

    #[test]
    fn unknown_action_fails_loudly() {
        let err = Action::parse("action=delete&video=1").unwrap_err();
        assert_eq!(err.to_string(), "Invalid paramstring: action=delete&video=1!");
        assert!(matches!(
            Action::parse("category=268"),
            Err(RouteError::UnknownAction(_))
        ));
    }

    #[test]
    fn missing_and_bad_params() {
        assert!(matches!(
            Action::parse("action=listing&category=268"),
            Err(RouteError::MissingParam {
                name: "subcategory",
                ..
            })
        ));
        assert!(matches!(
            Action::parse("action=categories&category=films"),
            Err(RouteError::InvalidId {
                name: "category",
                ..
            })
        ));
        assert!(matches!(
            Action::parse("action=play&video="),
            Err(RouteError::MissingParam { name: "video", .. })
        ));
    }

    #[test]
    fn query_round_trips() {
        let action = Action::Serial {
            category: 304,
            subcategory: 3,
            video_id: 99,
        };
        assert_eq!(
            action.to_query(),
            "action=serial&category=304&subcategory=3&video_id=99"
        );
        assert_eq!(Action::parse(&action.to_query()).unwrap(), action);
        assert_eq!(Action::Root.to_string(), "root");
    }
}
