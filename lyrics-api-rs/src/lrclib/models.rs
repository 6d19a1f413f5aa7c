use crate::models::{non_blank, LyricsText, Service};
use serde::{Deserialize, Serialize};

/// One LRCLIB record, as returned by both `/get` and `/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LrclibTrack {
    pub id: Option<i64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    /// Track duration in seconds
    pub duration: Option<f64>,
    pub instrumental: bool,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
}

impl LrclibTrack {
    pub fn convert(self) -> LyricsText {
        LyricsText {
            service: Some(Service::Lrclib),
            id: self.id.map(|id| id.to_string()),
            plain: non_blank(self.plain_lyrics),
            synced: non_blank(self.synced_lyrics),
            track_name: self.track_name,
            artist_name: self.artist_name,
            album_name: self.album_name,
        }
    }
}
