//! Lyrics fetching infrastructure
//!
//! Providers implement [`LyricsProvider`] (exact artist/title lookup) or
//! [`LyricsSearchProvider`] (fuzzy free-text search). The [`LyricsAggregator`]
//! fans a request out to every provider for every query variant at once and
//! picks the best answer: synced lyrics beat plain ones, and ties go to the
//! earliest call in dispatch order, never to whichever finished first.

use super::LyricsResult;
use super::identity::song_id;
use super::normalize::{is_non_latin, normalize};
use crate::config::LyricsConfig;
use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(12);

/// Why a provider call produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Absorbed {
    /// Transport, status, decode error or a panic inside the adapter
    Failed(String),
    TimedOut,
}

/// Outcome of one provider call with errors made explicit.
///
/// `Ok(None)` is the provider saying "no lyrics"; `Err` is the call failing.
pub type Absorbing<T> = std::result::Result<T, Absorbed>;

/// Which requests a provider takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    All,
    /// Slow or Latin-weak sources, only asked when the request has
    /// non-Latin text (unless gating is disabled)
    NonLatin,
}

/// Main trait for lyrics providers
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Human readable name, used as the result `source`
    fn name(&self) -> &str;

    fn supports_synced(&self) -> bool {
        false
    }

    fn scope(&self) -> ProviderScope {
        ProviderScope::All
    }

    /// Providers addressed by artist and title together skip title-only variants
    fn requires_artist(&self) -> bool {
        false
    }

    /// One exact lookup. `Ok(None)` means the upstream has nothing (404).
    async fn lookup(&self, artist: &str, title: &str, song_id: &str) -> Result<Option<LyricsResult>>;

    /// [`lookup`](Self::lookup) with every error absorbed at the adapter boundary
    async fn fetch(&self, artist: &str, title: &str, song_id: &str) -> Absorbing<Option<LyricsResult>> {
        match self.lookup(artist, title, song_id).await {
            Ok(Some(result)) if result.has_content() => Ok(Some(result)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("✗ Provider {} failed: {:#}", self.name(), e);
                Err(Absorbed::Failed(format!("{:#}", e)))
            }
        }
    }

    /// Health check - verify the provider is reachable
    async fn health_check(&self) -> Result<bool> {
        self.lookup("Adele", "Hello", &song_id("Adele", "Hello"))
            .await
            .map(|_| true)
    }
}

/// Fuzzy search provider returning candidates in relevance order
#[async_trait]
pub trait LyricsSearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str, song_id: &str) -> Result<Vec<LyricsResult>>;

    async fn search_absorbing(&self, query: &str, song_id: &str) -> Absorbing<Vec<LyricsResult>> {
        match self.search(query, song_id).await {
            Ok(results) => Ok(results.into_iter().filter(|r| r.has_content()).collect()),
            Err(e) => {
                tracing::warn!("✗ Search provider {} failed: {:#}", self.name(), e);
                Err(Absorbed::Failed(format!("{:#}", e)))
            }
        }
    }
}

/// One artist/title pair dispatched to the lookup providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryVariant {
    pub artist: String,
    pub title: String,
}

impl QueryVariant {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Equivalent variants share this key and are dispatched once
    pub fn key(&self) -> String {
        format!("{}|{}", self.artist.to_lowercase(), self.title.to_lowercase())
    }
}

/// Original, cleaned, and empty-artist forms, deduplicated in that order.
pub fn query_variants(
    artist: &str,
    title: &str,
    clean_artist: &str,
    clean_title: &str,
) -> Vec<QueryVariant> {
    let candidates = [
        QueryVariant::new(artist, title),
        QueryVariant::new(clean_artist, clean_title),
        QueryVariant::new("", title),
        QueryVariant::new("", clean_title),
    ];

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|v| !v.title.is_empty())
        .filter(|v| seen.insert(v.key()))
        .collect()
}

/// Free-text queries for the fuzzy search providers.
pub fn search_queries(
    artist: &str,
    title: &str,
    clean_artist: &str,
    clean_title: &str,
) -> Vec<String> {
    let candidates = [
        format!("{} {}", artist, title),
        title.to_string(),
        format!("{} {}", clean_artist, clean_title),
        clean_title.to_string(),
    ];

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .filter(|q| seen.insert(q.to_lowercase()))
        .collect()
}

/// Synced first, then plain; earliest candidate wins within each class.
pub fn select_best(candidates: Vec<LyricsResult>) -> Option<LyricsResult> {
    let synced = candidates.iter().position(|r| r.synced_text().is_some());
    match synced {
        Some(idx) => candidates.into_iter().nth(idx),
        None => candidates.into_iter().next(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallTarget {
    Lookup { artist: String, title: String },
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallStatus {
    Found { count: usize },
    NotFound,
    Failed { error: String },
    TimedOut,
}

/// Per-call diagnostics, in dispatch order
#[derive(Debug, Clone, Serialize)]
pub struct CallReport {
    pub provider: String,
    pub target: CallTarget,
    pub status: CallStatus,
    pub elapsed_ms: u64,
}

/// Full outcome of one orchestration pass
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub song_id: String,
    pub non_latin: bool,
    pub variants: Vec<QueryVariant>,
    pub result: Option<LyricsResult>,
    pub reports: Vec<CallReport>,
}

impl Resolution {
    /// True when nothing was found *and* no call got an answer at all,
    /// which points at an outage rather than a missing song.
    pub fn all_calls_failed(&self) -> bool {
        !self.reports.is_empty()
            && self
                .reports
                .iter()
                .all(|r| matches!(r.status, CallStatus::Failed { .. } | CallStatus::TimedOut))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("artist and title are both empty")]
    EmptyQuery,
}

/// Fans lookups out to every provider and selects the best answer
pub struct LyricsAggregator {
    providers: Vec<Box<dyn LyricsProvider>>,
    search_providers: Vec<Box<dyn LyricsSearchProvider>>,
    call_timeout: Duration,
    gate_slow_providers: bool,
}

impl LyricsAggregator {
    /// Create a new empty aggregator
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            search_providers: Vec::new(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            gate_slow_providers: true,
        }
    }

    /// Add a provider to the aggregator (builder pattern); order is dispatch order
    pub fn add_provider(mut self, provider: Box<dyn LyricsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn add_search_provider(mut self, provider: Box<dyn LyricsSearchProvider>) -> Self {
        self.search_providers.push(provider);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// When false, non-Latin-scoped providers are asked for every request
    pub fn with_slow_provider_gating(mut self, gate: bool) -> Self {
        self.gate_slow_providers = gate;
        self
    }

    pub fn with_config(self, config: &LyricsConfig) -> Self {
        self.with_call_timeout(config.call_timeout)
            .with_slow_provider_gating(config.gate_slow_providers)
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Get list of registered provider names, lookups first
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .map(|p| p.name())
            .chain(self.search_providers.iter().map(|p| p.name()))
            .collect()
    }

    /// Resolve the best lyrics for a song, or `None` when nothing was found
    pub async fn resolve(&self, artist: &str, title: &str) -> Result<Option<LyricsResult>, ResolveError> {
        Ok(self.resolve_detailed(artist, title).await?.result)
    }

    /// Like [`resolve`](Self::resolve), keeping the per-call reports
    pub async fn resolve_detailed(&self, artist: &str, title: &str) -> Result<Resolution, ResolveError> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() && title.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        let non_latin = is_non_latin(&format!("{}{}", artist, title));
        let clean_artist = normalize(artist, non_latin);
        let clean_title = normalize(title, non_latin);
        let song_id = song_id(artist, title);

        let variants = query_variants(artist, title, &clean_artist, &clean_title);
        let queries = search_queries(artist, title, &clean_artist, &clean_title);

        let active: Vec<&dyn LyricsProvider> = self
            .providers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| match p.scope() {
                ProviderScope::All => true,
                ProviderScope::NonLatin => non_latin || !self.gate_slow_providers,
            })
            .collect();

        // Dispatch order: variant-major, provider-minor, then searches.
        let mut lookups = Vec::with_capacity(variants.len() * active.len());
        for variant in &variants {
            for provider in &active {
                if variant.artist.is_empty() && provider.requires_artist() {
                    continue;
                }
                lookups.push(self.timed_lookup(*provider, variant, &song_id));
            }
        }

        let mut searches = Vec::with_capacity(queries.len() * self.search_providers.len());
        for query in &queries {
            for provider in &self.search_providers {
                searches.push(self.timed_search(provider.as_ref(), query, &song_id));
            }
        }

        tracing::info!(
            "Resolving '{}' by '{}' (non_latin={}): {} variants, {} lookups, {} searches",
            title,
            artist,
            non_latin,
            variants.len(),
            lookups.len(),
            searches.len()
        );

        let (lookup_outcomes, search_outcomes) = futures::join!(join_all(lookups), join_all(searches));

        let mut reports = Vec::new();
        let mut candidates = Vec::new();
        for (report, results) in lookup_outcomes.into_iter().chain(search_outcomes) {
            reports.push(report);
            candidates.extend(
                results
                    .into_iter()
                    .filter(|r| !r.plain_lyrics.trim().is_empty()),
            );
        }

        let result = select_best(candidates).map(|r| r.for_query(artist, title));
        match &result {
            Some(r) => tracing::info!(
                "✓ Selected lyrics from {} (synced={}) for {}",
                r.source,
                r.is_synced,
                song_id
            ),
            None => tracing::warn!("No lyrics found from any provider for {}", song_id),
        }

        Ok(Resolution {
            song_id,
            non_latin,
            variants,
            result,
            reports,
        })
    }

    async fn timed_lookup(
        &self,
        provider: &dyn LyricsProvider,
        variant: &QueryVariant,
        song_id: &str,
    ) -> (CallReport, Vec<LyricsResult>) {
        let started = Instant::now();
        let call = AssertUnwindSafe(provider.fetch(&variant.artist, &variant.title, song_id)).catch_unwind();

        let outcome = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(Absorbed::Failed("provider panicked".to_string())),
            Err(_) => Err(Absorbed::TimedOut),
        };

        let results: Vec<LyricsResult> = match &outcome {
            Ok(Some(result)) => vec![result.clone()],
            _ => Vec::new(),
        };
        let report = CallReport {
            provider: provider.name().to_string(),
            target: CallTarget::Lookup {
                artist: variant.artist.clone(),
                title: variant.title.clone(),
            },
            status: status_of(&outcome.map(|r| r.map_or(0, |_| 1))),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        log_report(&report);
        (report, results)
    }

    async fn timed_search(
        &self,
        provider: &dyn LyricsSearchProvider,
        query: &str,
        song_id: &str,
    ) -> (CallReport, Vec<LyricsResult>) {
        let started = Instant::now();
        let call = AssertUnwindSafe(provider.search_absorbing(query, song_id)).catch_unwind();

        let outcome = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(Absorbed::Failed("provider panicked".to_string())),
            Err(_) => Err(Absorbed::TimedOut),
        };

        let status = status_of(&outcome.as_ref().map(|r| r.len()).map_err(Clone::clone));
        let report = CallReport {
            provider: provider.name().to_string(),
            target: CallTarget::Search {
                query: query.to_string(),
            },
            status,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        log_report(&report);
        (report, outcome.unwrap_or_default())
    }

    /// Check health of all lookup providers
    pub async fn health_check_all(&self) -> Vec<(String, bool)> {
        let futures = self.providers.iter().map(|provider| {
            let provider_name = provider.name().to_string();
            async move {
                let check = tokio::time::timeout(self.call_timeout, provider.health_check()).await;
                let healthy = matches!(check, Ok(Ok(true)));
                (provider_name, healthy)
            }
        });

        join_all(futures).await
    }
}

impl Default for LyricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn status_of(outcome: &Absorbing<usize>) -> CallStatus {
    match outcome {
        Ok(0) => CallStatus::NotFound,
        Ok(count) => CallStatus::Found { count: *count },
        Err(Absorbed::Failed(error)) => CallStatus::Failed { error: error.clone() },
        Err(Absorbed::TimedOut) => CallStatus::TimedOut,
    }
}

fn log_report(report: &CallReport) {
    match &report.status {
        CallStatus::Found { count } => tracing::debug!(
            "✓ {} answered {:?} with {} result(s) in {}ms",
            report.provider,
            report.target,
            count,
            report.elapsed_ms
        ),
        CallStatus::NotFound => tracing::debug!("✗ {} has nothing for {:?}", report.provider, report.target),
        CallStatus::Failed { error } => {
            tracing::warn!("✗ {} failed for {:?}: {}", report.provider, report.target, error)
        }
        CallStatus::TimedOut => tracing::warn!(
            "✗ {} timed out after {}ms for {:?}",
            report.provider,
            report.elapsed_ms,
            report.target
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::providers::{MockBehavior, MockLyricsProvider};

    const SYNCED: &str = "[00:01.00]first line\n[00:02.00]second line";

    fn plain_only(name: &str) -> MockLyricsProvider {
        MockLyricsProvider::new(name).add_lyrics("Adele", "Hello", "hello plain", None)
    }

    fn synced(name: &str) -> MockLyricsProvider {
        MockLyricsProvider::new(name).add_lyrics("Adele", "Hello", "", Some(SYNCED))
    }

    #[test]
    fn test_variants_deduplicated() {
        let variants = query_variants("Adele", "Hello", "Adele", "Hello");
        assert_eq!(
            variants,
            vec![QueryVariant::new("Adele", "Hello"), QueryVariant::new("", "Hello")]
        );

        let variants = query_variants("Adele", "Hello (Official Video)", "Adele", "Hello");
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[1], QueryVariant::new("Adele", "Hello"));
    }

    #[test]
    fn test_variant_key_case_insensitive() {
        let variants = query_variants("ADELE", "HELLO", "adele", "hello");
        assert_eq!(variants.len(), 2);
    }

    #[test]
    fn test_search_queries() {
        let queries = search_queries("", "Hello", "", "Hello");
        assert_eq!(queries, vec!["Hello".to_string()]);

        let queries = search_queries("Adele", "Hello - Official Video", "Adele", "Hello");
        assert_eq!(
            queries,
            vec!["Adele Hello - Official Video", "Hello - Official Video", "Adele Hello", "Hello"]
        );
    }

    #[test]
    fn test_select_best_prefers_synced() {
        let a = LyricsResult::new("s", "A", "plain a", None);
        let b = LyricsResult::new("s", "B", "", Some(SYNCED.to_string()));
        let c = LyricsResult::new("s", "C", "", Some(SYNCED.to_string()));

        assert_eq!(select_best(vec![a.clone(), b, c]).unwrap().source, "B");
        assert_eq!(select_best(vec![a]).unwrap().source, "A");
        assert!(select_best(Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_synced_beats_plain_regardless_of_order() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(plain_only("Plain")))
            .add_provider(Box::new(synced("Synced")));

        let result = aggregator.resolve("Adele", "Hello").await.unwrap().unwrap();
        assert_eq!(result.source, "Synced");
        assert!(result.is_synced);
        assert_eq!(result.song_id, "adele_hello");
    }

    #[tokio::test]
    async fn test_tie_goes_to_dispatch_order_not_completion_order() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(synced("Slow").with_delay(Duration::from_millis(80))))
            .add_provider(Box::new(synced("Fast")));

        let result = aggregator.resolve("Adele", "Hello").await.unwrap().unwrap();
        assert_eq!(result.source, "Slow");
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let aggregator = LyricsAggregator::new()
            .with_call_timeout(Duration::from_millis(100))
            .add_provider(Box::new(synced("Broken").with_behavior(MockBehavior::Fail)))
            .add_provider(Box::new(synced("Panics").with_behavior(MockBehavior::Panic)))
            .add_provider(Box::new(synced("Stalls").with_delay(Duration::from_secs(30))))
            .add_provider(Box::new(plain_only("Healthy")));

        let resolution = aggregator.resolve_detailed("Adele", "Hello").await.unwrap();
        assert_eq!(resolution.result.as_ref().unwrap().source, "Healthy");
        assert!(!resolution.all_calls_failed());

        let status_of = |name: &str| {
            resolution
                .reports
                .iter()
                .find(|r| r.provider == name)
                .map(|r| r.status.clone())
                .unwrap()
        };
        assert!(matches!(status_of("Broken"), CallStatus::Failed { .. }));
        assert!(matches!(status_of("Panics"), CallStatus::Failed { .. }));
        assert_eq!(status_of("Stalls"), CallStatus::TimedOut);
        assert_eq!(status_of("Healthy"), CallStatus::Found { count: 1 });
    }

    #[tokio::test]
    async fn test_all_failed_is_distinguishable_from_not_found() {
        let failing = LyricsAggregator::new()
            .add_provider(Box::new(synced("Broken").with_behavior(MockBehavior::Fail)));
        let resolution = failing.resolve_detailed("Adele", "Hello").await.unwrap();
        assert!(resolution.result.is_none());
        assert!(resolution.all_calls_failed());

        let empty = LyricsAggregator::new().add_provider(Box::new(MockLyricsProvider::new("Empty")));
        let resolution = empty.resolve_detailed("Adele", "Hello").await.unwrap();
        assert!(resolution.result.is_none());
        assert!(!resolution.all_calls_failed());
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let aggregator = LyricsAggregator::new().add_provider(Box::new(plain_only("Plain")));
        assert_eq!(
            aggregator.resolve("  ", "").await.unwrap_err(),
            ResolveError::EmptyQuery
        );
    }

    #[tokio::test]
    async fn test_cleaned_variant_finds_lyrics() {
        let aggregator = LyricsAggregator::new().add_provider(Box::new(synced("Synced")));
        let resolution = aggregator
            .resolve_detailed("Adele", "Hello (Official Music Video)")
            .await
            .unwrap();

        assert_eq!(resolution.song_id, "adele_hello_official_music_video_");
        let result = resolution.result.unwrap();
        assert_eq!(result.song_id, resolution.song_id);
        assert!(result.is_synced);
    }

    #[tokio::test]
    async fn test_slow_providers_gated_to_non_latin() {
        let gated = || {
            LyricsAggregator::new().add_provider(Box::new(
                MockLyricsProvider::demo().with_scope(ProviderScope::NonLatin),
            ))
        };

        let latin = gated().resolve_detailed("Adele", "Hello").await.unwrap();
        assert!(latin.reports.is_empty());
        assert!(latin.result.is_none());

        let japanese = gated()
            .resolve_detailed("坂本九", "上を向いて歩こう")
            .await
            .unwrap();
        assert!(japanese.non_latin);
        assert!(japanese.result.unwrap().is_synced);

        let ungated = gated()
            .with_slow_provider_gating(false)
            .resolve_detailed("Adele", "Hello")
            .await
            .unwrap();
        assert!(ungated.result.is_some());
    }

    #[tokio::test]
    async fn test_search_fallback() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(MockLyricsProvider::new("Empty")))
            .add_search_provider(Box::new(MockLyricsProvider::demo()));

        let resolution = aggregator.resolve_detailed("Sia", "Chandelier").await.unwrap();
        let result = resolution.result.unwrap();
        assert_eq!(result.source, "Demo");
        assert_eq!(result.song_id, "sia_chandelier");
        assert!(resolution
            .reports
            .iter()
            .any(|r| matches!(r.target, CallTarget::Search { .. })));
    }

    #[tokio::test]
    async fn test_reports_follow_dispatch_order() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(plain_only("First")))
            .add_provider(Box::new(plain_only("Second")));

        let resolution = aggregator.resolve_detailed("Adele", "Hello").await.unwrap();
        let order: Vec<(&str, &CallTarget)> = resolution
            .reports
            .iter()
            .map(|r| (r.provider.as_str(), &r.target))
            .collect();

        let full = CallTarget::Lookup {
            artist: "Adele".to_string(),
            title: "Hello".to_string(),
        };
        let title_only = CallTarget::Lookup {
            artist: String::new(),
            title: "Hello".to_string(),
        };
        assert_eq!(
            order,
            vec![
                ("First", &full),
                ("Second", &full),
                ("First", &title_only),
                ("Second", &title_only),
            ]
        );
    }

    #[tokio::test]
    async fn test_artist_bound_providers_skip_title_only_variants() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(plain_only("Open")))
            .add_provider(Box::new(plain_only("PathA").with_requires_artist(true)))
            .add_provider(Box::new(plain_only("PathB").with_requires_artist(true)));

        // 4 variants: original, cleaned, and their title-only forms
        let resolution = aggregator
            .resolve_detailed("Adele", "Hello (Official Video)")
            .await
            .unwrap();
        assert_eq!(resolution.variants.len(), 4);

        // Full cross-product would be 12; the two artist-bound providers
        // sit out the 2 title-only variants
        assert_eq!(resolution.reports.len(), 12 - 2 * 2);
        let title_only: Vec<&str> = resolution
            .reports
            .iter()
            .filter(|r| matches!(&r.target, CallTarget::Lookup { artist, .. } if artist.is_empty()))
            .map(|r| r.provider.as_str())
            .collect();
        assert_eq!(title_only, vec!["Open", "Open"]);
        assert!(resolution.result.is_some());
    }

    #[tokio::test]
    async fn test_provider_names_and_health() {
        let aggregator = LyricsAggregator::new()
            .add_provider(Box::new(plain_only("Up")))
            .add_provider(Box::new(plain_only("Down").with_behavior(MockBehavior::Fail)))
            .add_search_provider(Box::new(MockLyricsProvider::new("Search")));

        assert_eq!(aggregator.provider_names(), vec!["Up", "Down", "Search"]);

        let health = aggregator.health_check_all().await;
        assert_eq!(
            health,
            vec![("Up".to_string(), true), ("Down".to_string(), false)]
        );
    }
}
