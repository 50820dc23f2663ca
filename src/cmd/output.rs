use anyhow::Result;
use serde::Serialize;

use epika::listing::{EntryKind, Listing};
use epika::ResolvedPlayable;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// User-facing notification; stderr so stdout stays parseable.
pub fn notify(message: &str, is_error: bool) {
    if is_error {
        eprintln!("❌ {message}");
    } else {
        eprintln!("ℹ️  {message}");
    }
}

pub fn print_listing(listing: &Listing, json: bool) -> Result<()> {
    if json {
        return print_json(listing);
    }

    println!("📂 {}", listing.title);
    for entry in &listing.entries {
        let marker = match entry.kind {
            EntryKind::Folder => "[dir] ",
            EntryKind::Playable => "[play]",
        };
        let year = entry.year.map(|y| format!(" ({y})")).unwrap_or_default();
        let duration = entry
            .duration
            .map(|d| format!(" {}:{:02}", d / 60, d % 60))
            .unwrap_or_default();
        println!("  {marker} {}{year}{duration}", entry.label);
        println!("         {}", entry.action.to_query());
    }
    println!("\n({} entries)", listing.entries.len());
    Ok(())
}

pub fn print_playable(playable: &ResolvedPlayable, json: bool) -> Result<()> {
    if json {
        return print_json(playable);
    }

    if let Some(meta) = &playable.metadata {
        println!("🎬 {}", meta.title);
        if let Some(desc) = &meta.description {
            println!("   {desc}");
        }
        if let Some(dur) = meta.duration {
            println!("   Duration: {}:{:02}", dur / 60, dur % 60);
        }
    } else {
        println!("🎬 {}", playable.content_id);
    }

    println!("Stream: {}", playable.stream_url);
    println!(
        "Manifest: {} ({})",
        playable.transport.manifest_type(),
        playable.transport.mime_type()
    );
    match (playable.drm, &playable.license_key) {
        (Some(drm), Some(key)) => {
            println!("DRM: {}", drm.key_system());
            println!("License key: {key}");
        }
        _ => println!("DRM: none"),
    }
    if playable.subtitles.is_empty() {
        println!("Subtitles: none");
    } else {
        println!("Subtitles:");
        for url in &playable.subtitles {
            println!("  {url}");
        }
    }
    Ok(())
}
