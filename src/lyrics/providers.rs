//! In-memory lyrics provider
//!
//! Used by the test suites and by `fetch-lyrics --offline`. It answers both
//! exact lookups and fuzzy searches from a small catalogue and can be told to
//! fail or stall so that orchestration behaviour can be exercised without a
//! network.

use super::LyricsResult;
use super::fetcher::{LyricsProvider, LyricsSearchProvider, ProviderScope};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct MockEntry {
    artist: String,
    title: String,
    plain: String,
    synced: Option<String>,
}

/// Configurable misbehaviour for a [`MockLyricsProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockBehavior {
    #[default]
    Answer,
    /// Every call returns an error
    Fail,
    /// Every call panics
    Panic,
}

pub struct MockLyricsProvider {
    name: String,
    scope: ProviderScope,
    requires_artist: bool,
    delay: Option<Duration>,
    behavior: MockBehavior,
    lyrics_db: BTreeMap<String, MockEntry>,
}

impl MockLyricsProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: ProviderScope::All,
            requires_artist: false,
            delay: None,
            behavior: MockBehavior::Answer,
            lyrics_db: BTreeMap::new(),
        }
    }

    /// Add a lyrics entry; `synced` is LRC text when present
    pub fn add_lyrics(
        mut self,
        artist: impl Into<String>,
        title: impl Into<String>,
        plain: impl Into<String>,
        synced: Option<&str>,
    ) -> Self {
        let entry = MockEntry {
            artist: artist.into(),
            title: title.into(),
            plain: plain.into(),
            synced: synced.map(str::to_string),
        };
        self.lyrics_db.insert(Self::key(&entry.artist, &entry.title), entry);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_scope(mut self, scope: ProviderScope) -> Self {
        self.scope = scope;
        self
    }

    /// Behave like a path-addressed service that needs an artist
    pub fn with_requires_artist(mut self, requires_artist: bool) -> Self {
        self.requires_artist = requires_artist;
        self
    }

    /// A catalogue with a few well known songs
    pub fn demo() -> Self {
        Self::new("Demo")
            .add_lyrics(
                "Adele",
                "Hello",
                "",
                Some("[00:18.00]Hello, it's me\n[00:21.50]I was wondering if after all these years you'd like to meet\n[00:28.00]To go over everything"),
            )
            .add_lyrics(
                "Sia",
                "Chandelier",
                "Party girls don't get hurt\nCan't feel anything, when will I learn",
                None,
            )
            .add_lyrics(
                "坂本九",
                "上を向いて歩こう",
                "",
                Some("[00:10.00]上を向いて歩こう\n[00:16.00]涙がこぼれないように"),
            )
    }

    fn key(artist: &str, title: &str) -> String {
        format!("{}:{}", artist.to_lowercase(), title.to_lowercase())
    }

    /// Calculate string similarity (simple implementation)
    fn similarity(a: &str, b: &str) -> f32 {
        let a = a.to_lowercase();
        let b = b.to_lowercase();

        if a == b {
            return 1.0;
        }

        if a.contains(&b) || b.contains(&a) {
            return 0.8;
        }

        let len_a = a.chars().count() as f32;
        let len_b = b.chars().count() as f32;
        let max_len = len_a.max(len_b);

        if max_len == 0.0 {
            return 0.0;
        }

        (1.0 - (len_a - len_b).abs() / max_len) * 0.5
    }

    async fn misbehave(&self) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.behavior {
            MockBehavior::Answer => Ok(()),
            MockBehavior::Fail => anyhow::bail!("{} is unavailable", self.name),
            MockBehavior::Panic => panic!("{} blew up", self.name),
        }
    }

    fn to_result(&self, entry: &MockEntry, song_id: &str) -> LyricsResult {
        LyricsResult::new(song_id, &self.name, &entry.plain, entry.synced.clone()).with_metadata(
            Some(entry.artist.clone()),
            Some(entry.title.clone()),
            None,
        )
    }
}

#[async_trait]
impl LyricsProvider for MockLyricsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_synced(&self) -> bool {
        true
    }

    fn scope(&self) -> ProviderScope {
        self.scope
    }

    fn requires_artist(&self) -> bool {
        self.requires_artist
    }

    async fn lookup(&self, artist: &str, title: &str, song_id: &str) -> Result<Option<LyricsResult>> {
        self.misbehave().await?;

        if artist.is_empty() {
            // Title-only lookups match when exactly one catalogue entry has that title
            let mut matches = self
                .lyrics_db
                .values()
                .filter(|e| e.title.eq_ignore_ascii_case(title));
            return Ok(match (matches.next(), matches.next()) {
                (Some(entry), None) => Some(self.to_result(entry, song_id)),
                _ => None,
            });
        }

        Ok(self
            .lyrics_db
            .get(&Self::key(artist, title))
            .map(|entry| self.to_result(entry, song_id)))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.behavior == MockBehavior::Answer)
    }
}

#[async_trait]
impl LyricsSearchProvider for MockLyricsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, song_id: &str) -> Result<Vec<LyricsResult>> {
        self.misbehave().await?;

        let mut scored: Vec<(f32, &MockEntry)> = self
            .lyrics_db
            .values()
            .map(|entry| {
                let full = format!("{} {}", entry.artist, entry.title);
                let confidence = Self::similarity(query, &full).max(Self::similarity(query, &entry.title));
                (confidence, entry)
            })
            .filter(|(confidence, _)| *confidence > 0.5)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .map(|(_, entry)| self.to_result(entry, song_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_lookup() {
        let provider = MockLyricsProvider::demo();

        let result = provider
            .lookup("adele", "HELLO", "adele_hello")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.source, "Demo");
        assert!(result.is_synced);
        assert!(result.plain_lyrics.starts_with("Hello, it's me"));

        assert!(provider.lookup("Adele", "Skyfall", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_title_only_lookup() {
        let provider = MockLyricsProvider::demo();
        let result = provider.lookup("", "chandelier", "sia_chandelier").await.unwrap();
        assert_eq!(result.unwrap().artist_name.as_deref(), Some("Sia"));
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let provider = MockLyricsProvider::demo();
        let results = provider.search("Sia Chandelier", "sia_chandelier").await.unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].track_name.as_deref(), Some("Chandelier"));
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = MockLyricsProvider::demo().with_behavior(MockBehavior::Fail);
        assert!(provider.lookup("Adele", "Hello", "adele_hello").await.is_err());
        assert!(!provider.health_check().await.unwrap());

        let absorbed = provider.fetch("Adele", "Hello", "adele_hello").await;
        assert!(absorbed.is_err());
    }

    #[test]
    fn test_similarity() {
        assert_eq!(MockLyricsProvider::similarity("hello", "HELLO"), 1.0);
        assert_eq!(MockLyricsProvider::similarity("hello world", "hello"), 0.8);
        assert!(MockLyricsProvider::similarity("abc", "xyz") <= 0.5);
    }
}
