pub mod api_provider;
pub mod cache;
pub mod fetcher;
pub mod identity;
pub mod lrc;
pub mod normalize;
pub mod providers;
pub mod service;

use chrono::{DateTime, Utc};
use lrc::ParsedLrc;
use lyrics_api_rs::LyricsText;
use serde::{Deserialize, Serialize};

/// Lyrics for one song as produced by a provider or the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsResult {
    pub id: String,
    pub song_id: String,
    #[serde(default)]
    pub plain_lyrics: String,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
    #[serde(default)]
    pub is_synced: bool,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    /// [`identity::query_key`] of the request this result answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl LyricsResult {
    /// Build a result, keeping `is_synced` consistent with `synced`.
    ///
    /// When `plain` is empty but synced text exists, the plain text is derived
    /// by stripping the timestamp tags.
    pub fn new(
        song_id: impl Into<String>,
        source: impl Into<String>,
        plain: impl Into<String>,
        synced: Option<String>,
    ) -> Self {
        let song_id = song_id.into();
        let synced = synced.filter(|s| !s.trim().is_empty());
        let mut plain: String = plain.into();
        if plain.trim().is_empty() {
            plain = synced.as_deref().map(lrc::strip_timestamps).unwrap_or_default();
        }

        let fetched_at = Utc::now();
        Self {
            id: identity::result_id(&song_id, fetched_at),
            song_id,
            plain_lyrics: plain,
            is_synced: synced.is_some(),
            synced_lyrics: synced,
            source: source.into(),
            fetched_at,
            artist_name: None,
            track_name: None,
            album_name: None,
            query: None,
        }
    }

    /// Convert an upstream answer; provider ids become part of the result id.
    pub fn from_text(text: LyricsText, song_id: &str, source: &str) -> Self {
        let mut result = Self::new(song_id, source, text.plain.unwrap_or_default(), text.synced);
        if let Some(provider_id) = text.id {
            result.id = format!("{}_{}", source.to_lowercase(), provider_id);
        }
        result.artist_name = text.artist_name;
        result.track_name = text.track_name;
        result.album_name = text.album_name;
        result
    }

    pub fn with_metadata(
        mut self,
        artist_name: Option<String>,
        track_name: Option<String>,
        album_name: Option<String>,
    ) -> Self {
        self.artist_name = artist_name;
        self.track_name = track_name;
        self.album_name = album_name;
        self
    }

    pub fn for_query(mut self, artist: &str, title: &str) -> Self {
        self.query = Some(identity::query_key(artist, title));
        self
    }

    /// Whether this result answers a request for `(artist, title)`.
    ///
    /// Results without a recorded query can only be matched by song id.
    pub fn answers(&self, artist: &str, title: &str) -> bool {
        match &self.query {
            Some(query) => *query == identity::query_key(artist, title),
            None => self.song_id == identity::song_id(artist.trim(), title.trim()),
        }
    }

    /// A result with neither plain nor synced text is not a valid result.
    pub fn has_content(&self) -> bool {
        !self.plain_lyrics.trim().is_empty() || self.synced_text().is_some()
    }

    /// Synced LRC text, only when the result is marked synced
    pub fn synced_text(&self) -> Option<&str> {
        self.synced_lyrics
            .as_deref()
            .filter(|s| self.is_synced && !s.trim().is_empty())
    }

    pub fn parse_synced(&self) -> Option<ParsedLrc> {
        self.synced_text().map(ParsedLrc::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synced_flag_follows_synced_text() {
        let synced = LyricsResult::new("a_b", "LRCLIB", "x", Some("[00:01.00]x".to_string()));
        assert!(synced.is_synced);
        assert!(synced.synced_text().is_some());

        let blank = LyricsResult::new("a_b", "LRCLIB", "x", Some("  ".to_string()));
        assert!(!blank.is_synced);
        assert!(blank.synced_lyrics.is_none());
    }

    #[test]
    fn test_plain_derived_from_synced() {
        let result = LyricsResult::new(
            "adele_hello",
            "LRCLIB",
            "",
            Some("[00:18.00]Hello, it's me\n[00:21.00]I was wondering".to_string()),
        );
        assert_eq!(result.plain_lyrics, "Hello, it's me\nI was wondering");
        assert!(result.id.starts_with("adele_hello_"));
    }

    #[test]
    fn test_has_content() {
        assert!(!LyricsResult::new("a", "s", "", None).has_content());
        assert!(LyricsResult::new("a", "s", "words", None).has_content());
    }

    #[test]
    fn test_from_text_uses_provider_id() {
        let text = LyricsText {
            id: Some("42".to_string()),
            plain: Some("words".to_string()),
            track_name: Some("Hello".to_string()),
            ..Default::default()
        };
        let result = LyricsResult::from_text(text, "adele_hello", "ChartLyrics");
        assert_eq!(result.id, "chartlyrics_42");
        assert_eq!(result.song_id, "adele_hello");
        assert_eq!(result.track_name.as_deref(), Some("Hello"));
        assert!(!result.is_synced);
    }

    #[test]
    fn test_answers_its_own_query_only() {
        let sunny = LyricsResult::new("_", "NetEase", "故事的小黄花", None).for_query("周杰伦", "晴天");
        assert!(sunny.answers(" 周杰伦 ", "晴天"));
        assert!(!sunny.answers("周杰伦", "稻香"));

        let legacy = LyricsResult::new("adele_hello", "LRCLIB", "words", None);
        assert!(legacy.answers("Adele", "Hello"));
        assert!(!legacy.answers("Adele", "Skyfall"));
    }

    #[test]
    fn test_json_shape() {
        let result = LyricsResult::new("sia_chandelier", "Lyrist", "words", None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["songId"], "sia_chandelier");
        assert_eq!(json["plainLyrics"], "words");
        assert_eq!(json["isSynced"], false);
        assert!(json.get("albumName").is_none());
        assert!(json.get("query").is_none());

        let back: LyricsResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
