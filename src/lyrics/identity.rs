//! Deterministic song identity used as the cache key and as the correlation
//! prefix of every fetched result id.

use chrono::{DateTime, Utc};

/// Slug of `(artist, title)`: lower-cased `"{artist}_{title}"` with every
/// character outside `[a-z0-9_]` replaced by `_` and `_` runs collapsed.
pub fn song_id(artist: &str, title: &str) -> String {
    let raw = format!("{}_{}", artist, title).to_lowercase();

    let mut id = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' };
        if c == '_' && id.ends_with('_') {
            continue;
        }
        id.push(c);
    }
    id
}

/// Exact identity of a lookup: trimmed, lower-cased artist and title.
///
/// [`song_id`] folds every character outside `[a-z0-9]`, so songs written
/// entirely in other scripts share one slug. This key keeps them apart.
pub fn query_key(artist: &str, title: &str) -> String {
    format!("{}\u{1f}{}", artist.trim().to_lowercase(), title.trim().to_lowercase())
}

/// Result id unique per fetch: the song id plus the fetch instant.
pub fn result_id(song_id: &str, fetched_at: DateTime<Utc>) -> String {
    format!("{}_{}", song_id, fetched_at.timestamp_millis())
}
