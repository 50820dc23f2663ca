//! Playback resolution for catalog items.
//!
//! Turns a content id into a DASH manifest URL, an optional Widevine
//! license template and a list of subtitle tracks.

pub mod playable;
pub mod resolver;
pub mod url;

pub use playable::{DrmScheme, Metadata, ResolvedPlayable, Transport};
pub use resolver::{license_key, resolve_playlist, PlaybackResolver};
