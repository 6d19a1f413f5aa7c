//! Cache-first lyrics lookup used by the server, the CLI and the follower

use super::LyricsResult;
use super::cache::LyricsCache;
use super::fetcher::{LyricsAggregator, Resolution, ResolveError};
use super::identity::song_id;
use super::lrc::ParsedLrc;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no lyrics found for {song_id}")]
    NotFound { song_id: String },

    #[error("lyrics lookup for {song_id} exceeded {timeout:?}")]
    TimedOut { song_id: String, timeout: Duration },

    #[error("artist and title are both empty")]
    EmptyQuery,

    #[error("lyrics cache error: {0:#}")]
    Cache(#[source] anyhow::Error),
}

impl From<ResolveError> for LookupError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyQuery => LookupError::EmptyQuery,
        }
    }
}

pub struct LyricsService {
    aggregator: LyricsAggregator,
    cache: Arc<LyricsCache>,
    resolve_timeout: Duration,
}

impl LyricsService {
    pub fn new(aggregator: LyricsAggregator, cache: Arc<LyricsCache>, resolve_timeout: Duration) -> Self {
        Self {
            aggregator,
            cache,
            resolve_timeout,
        }
    }

    pub fn aggregator(&self) -> &LyricsAggregator {
        &self.aggregator
    }

    pub fn cache(&self) -> &LyricsCache {
        &self.cache
    }

    /// Cached lyrics if present, otherwise resolve and cache the winner
    pub async fn lookup(&self, artist: &str, title: &str) -> Result<LyricsResult, LookupError> {
        let (artist, title) = (artist.trim(), title.trim());
        if artist.is_empty() && title.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let id = song_id(artist, title);
        match self.cache.get(&id).await {
            Ok(Some(cached)) if cached.answers(artist, title) => {
                tracing::debug!("Cache hit for {}", id);
                return Ok(cached);
            }
            Ok(Some(_)) => tracing::debug!("Cache slot {} holds another song, refetching", id),
            Ok(None) => {}
            // A broken cache only costs a network round
            Err(e) => tracing::warn!("Cache read failed for {}: {:#}", id, e),
        }

        self.fetch_and_store(artist, title).await
    }

    /// Resolve from the providers, ignoring any cached entry
    pub async fn refresh(&self, artist: &str, title: &str) -> Result<LyricsResult, LookupError> {
        let (artist, title) = (artist.trim(), title.trim());
        if artist.is_empty() && title.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        self.fetch_and_store(artist, title).await
    }

    /// Resolve with diagnostics, bypassing the cache entirely
    pub async fn diagnose(&self, artist: &str, title: &str) -> Result<Resolution, LookupError> {
        let id = song_id(artist.trim(), title.trim());
        match tokio::time::timeout(self.resolve_timeout, self.aggregator.resolve_detailed(artist, title)).await {
            Ok(resolution) => Ok(resolution?),
            Err(_) => Err(LookupError::TimedOut {
                song_id: id,
                timeout: self.resolve_timeout,
            }),
        }
    }

    async fn fetch_and_store(&self, artist: &str, title: &str) -> Result<LyricsResult, LookupError> {
        let id = song_id(artist, title);

        // Dropping the resolve future on timeout cancels every pending call
        let resolved = tokio::time::timeout(self.resolve_timeout, self.aggregator.resolve(artist, title)).await;
        let result = match resolved {
            Ok(Ok(Some(result))) => result,
            Ok(Ok(None)) => {
                tracing::info!("Lyrics not found for {}", id);
                return Err(LookupError::NotFound { song_id: id });
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::warn!(
                    "Lyrics lookup for {} timed out after {:?}",
                    id,
                    self.resolve_timeout
                );
                return Err(LookupError::TimedOut {
                    song_id: id,
                    timeout: self.resolve_timeout,
                });
            }
        };

        self.cache.put(&result).await.map_err(LookupError::Cache)?;
        Ok(result)
    }

    /// Parsed synced lyrics, when the result has any
    pub fn parsed(result: &LyricsResult) -> Option<ParsedLrc> {
        result.parse_synced()
    }
}
