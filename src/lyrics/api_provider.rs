//! Adapters from the `lyrics-api-rs` clients to the provider traits

use super::LyricsResult;
use super::fetcher::{LyricsAggregator, LyricsProvider, LyricsSearchProvider, ProviderScope};
use crate::config::LyricsConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lyrics_api_rs::{
    ChartLyricsApi, LrclibApi, LyricsApi, NetEaseApi, PlainTextApi, Service, TextylApi,
};

/// Exact-lookup provider backed by one upstream client
pub struct ApiLyricsProvider {
    api: Box<dyn LyricsApi>,
    scope: ProviderScope,
}

impl ApiLyricsProvider {
    /// Wrap any client; ChartLyrics and NetEase are scoped to non-Latin input
    pub fn new(api: Box<dyn LyricsApi>) -> Self {
        let scope = match api.service() {
            Service::ChartLyrics | Service::NetEase => ProviderScope::NonLatin,
            _ => ProviderScope::All,
        };
        Self { api, scope }
    }

    /// One provider per upstream, in dispatch order
    pub fn all(config: &LyricsConfig) -> Result<Vec<Self>> {
        let http = config.http_settings();
        let endpoints = &config.endpoints;

        let apis: Vec<Box<dyn LyricsApi>> = vec![
            Box::new(
                LrclibApi::with_base_url(&http, &endpoints.lrclib)
                    .context("Failed to create LRCLIB client")?,
            ),
            Box::new(
                TextylApi::with_base_url(&http, &endpoints.textyl)
                    .context("Failed to create Textyl client")?,
            ),
            Box::new(
                PlainTextApi::with_base_url(Service::LyricsOvh, &http, &endpoints.lyrics_ovh)
                    .context("Failed to create lyrics.ovh client")?,
            ),
            Box::new(
                PlainTextApi::with_base_url(Service::Lyrist, &http, &endpoints.lyrist)
                    .context("Failed to create Lyrist client")?,
            ),
            Box::new(
                ChartLyricsApi::with_base_url(&http, &endpoints.chartlyrics)
                    .context("Failed to create ChartLyrics client")?,
            ),
            Box::new(
                NetEaseApi::with_base_url(&http, &endpoints.netease)
                    .context("Failed to create NetEase client")?,
            ),
        ];

        Ok(apis.into_iter().map(Self::new).collect())
    }

    pub fn service(&self) -> Service {
        self.api.service()
    }
}

#[async_trait]
impl LyricsProvider for ApiLyricsProvider {
    fn name(&self) -> &str {
        self.api.service().display_name()
    }

    fn supports_synced(&self) -> bool {
        matches!(self.api.service(), Service::Lrclib | Service::Textyl)
    }

    fn scope(&self) -> ProviderScope {
        self.scope
    }

    fn requires_artist(&self) -> bool {
        matches!(
            self.api.service(),
            Service::LyricsOvh | Service::Lyrist | Service::ChartLyrics
        )
    }

    async fn lookup(&self, artist: &str, title: &str, song_id: &str) -> Result<Option<LyricsResult>> {
        if artist.is_empty() && self.requires_artist() {
            return Ok(None);
        }

        match self.api.lookup(artist, title).await {
            Ok(Some(text)) => Ok(Some(LyricsResult::from_text(text, song_id, self.name()))),
            Ok(None) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) if e.is_timeout() => Err(e).with_context(|| format!("{} timed out", self.name())),
            Err(e) => Err(e).with_context(|| format!("{} lookup failed", self.name())),
        }
    }
}

/// LRCLIB fuzzy search
pub struct LrclibSearchProvider {
    api: LrclibApi,
    max_results: usize,
}

impl LrclibSearchProvider {
    pub fn new(api: LrclibApi) -> Self {
        Self { api, max_results: 5 }
    }

    pub fn from_config(config: &LyricsConfig) -> Result<Self> {
        let api = LrclibApi::with_base_url(&config.http_settings(), &config.endpoints.lrclib)
            .context("Failed to create LRCLIB client")?;
        Ok(Self::new(api))
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

#[async_trait]
impl LyricsSearchProvider for LrclibSearchProvider {
    fn name(&self) -> &str {
        "LRCLIB search"
    }

    async fn search(&self, query: &str, song_id: &str) -> Result<Vec<LyricsResult>> {
        let tracks = match self.api.search(query).await {
            Ok(tracks) => tracks,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e).context("LRCLIB search failed"),
        };

        Ok(tracks
            .into_iter()
            .map(|track| track.convert())
            .filter(|text| !text.is_empty())
            .take(self.max_results)
            .map(|text| LyricsResult::from_text(text, song_id, Service::Lrclib.display_name()))
            .collect())
    }
}

/// Aggregator wired with every public upstream plus LRCLIB search
pub fn default_aggregator(config: &LyricsConfig) -> Result<LyricsAggregator> {
    let mut aggregator = LyricsAggregator::new().with_config(config);
    for provider in ApiLyricsProvider::all(config)? {
        aggregator = aggregator.add_provider(Box::new(provider));
    }
    Ok(aggregator.add_search_provider(Box::new(LrclibSearchProvider::from_config(config)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyrics_api_rs::{HttpSettings, LyricsApiError, LyricsText};

    struct CannedApi {
        service: Service,
        answer: fn() -> lyrics_api_rs::Result<Option<LyricsText>>,
    }

    #[async_trait]
    impl LyricsApi for CannedApi {
        fn service(&self) -> Service {
            self.service
        }

        async fn lookup(&self, _artist: &str, _title: &str) -> lyrics_api_rs::Result<Option<LyricsText>> {
            (self.answer)()
        }
    }

    fn canned(service: Service, answer: fn() -> lyrics_api_rs::Result<Option<LyricsText>>) -> ApiLyricsProvider {
        ApiLyricsProvider::new(Box::new(CannedApi { service, answer }))
    }

    #[test]
    fn test_scopes() {
        let config = LyricsConfig::default();
        let providers = ApiLyricsProvider::all(&config).unwrap();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec!["LRCLIB", "Textyl", "Lyrics.ovh", "Lyrist", "ChartLyrics", "NetEase"]
        );

        let gated: Vec<Service> = providers
            .iter()
            .filter(|p| p.scope() == ProviderScope::NonLatin)
            .map(|p| p.service())
            .collect();
        assert_eq!(gated, vec![Service::ChartLyrics, Service::NetEase]);
    }

    #[tokio::test]
    async fn test_not_found_status_is_not_an_error() {
        let provider = canned(Service::Lrclib, || {
            Err(LyricsApiError::Status {
                status: 404,
                url: "http://lrclib/get".to_string(),
            })
        });
        assert!(provider.lookup("Adele", "Hello", "adele_hello").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_absorbed_by_fetch() {
        let provider = canned(Service::Textyl, || {
            Err(LyricsApiError::Status {
                status: 503,
                url: "http://textyl".to_string(),
            })
        });
        assert!(provider.lookup("Adele", "Hello", "adele_hello").await.is_err());
        assert!(provider.fetch("Adele", "Hello", "adele_hello").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_artist_skips_path_addressed_services() {
        let provider = canned(Service::LyricsOvh, || panic!("must not be called"));
        assert!(provider.lookup("", "Hello", "hello").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_result_mapping() {
        let provider = canned(Service::Lrclib, || {
            Ok(Some(LyricsText {
                service: Some(Service::Lrclib),
                id: Some("3396226".to_string()),
                synced: Some("[00:18.00]Hello, it's me".to_string()),
                artist_name: Some("Adele".to_string()),
                ..Default::default()
            }))
        });

        let result = provider
            .lookup("Adele", "Hello", "adele_hello")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.source, "LRCLIB");
        assert_eq!(result.id, "lrclib_3396226");
        assert_eq!(result.song_id, "adele_hello");
        assert!(result.is_synced);
        assert_eq!(result.plain_lyrics, "Hello, it's me");
    }

    #[test]
    fn test_default_aggregator_wiring() {
        let aggregator = default_aggregator(&LyricsConfig::default()).unwrap();
        assert_eq!(aggregator.provider_names().len(), 7);
        assert_eq!(aggregator.provider_names()[6], "LRCLIB search");

        let search = LrclibSearchProvider::new(LrclibApi::new(&HttpSettings::default()).unwrap())
            .with_max_results(2);
        assert_eq!(search.max_results, 2);
    }
}
