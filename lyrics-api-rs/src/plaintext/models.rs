use serde::{Deserialize, Serialize};

/// Body shared by lyrics.ovh and Lyrist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlainLyricsBody {
    pub lyrics: Option<String>,
    /// Lyrist echoes the matched title and artist
    pub title: Option<String>,
    pub artist: Option<String>,
    /// lyrics.ovh reports misses as `{"error": "..."}`, sometimes with a 200
    pub error: Option<String>,
}
