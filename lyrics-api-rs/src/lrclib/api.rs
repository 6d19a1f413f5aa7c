use crate::error::Result;
use crate::http::{build_client, get_json};
use crate::lrclib::models::LrclibTrack;
use crate::models::HttpSettings;
use reqwest::Client;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

/// LRCLIB client (<https://lrclib.net/docs>)
#[derive(Debug, Clone)]
pub struct LrclibApi {
    client: Client,
    base_url: String,
}

impl LrclibApi {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(settings: &HttpSettings, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Exact lookup by track and artist name
    #[instrument(skip(self), fields(service = "lrclib"))]
    pub async fn get(&self, track_name: &str, artist_name: &str) -> Result<Option<LrclibTrack>> {
        let url = format!("{}/get", self.base_url);
        let track: Option<LrclibTrack> = get_json(
            &self.client,
            &url,
            &[("track_name", track_name), ("artist_name", artist_name)],
        )
        .await?;

        match &track {
            Some(t) => info!(
                "LRCLIB match: synced={}, plain={}",
                t.synced_lyrics.is_some(),
                t.plain_lyrics.is_some()
            ),
            None => debug!("LRCLIB has no exact match"),
        }
        Ok(track)
    }

    /// Fuzzy full-text search; candidates come back in relevance order
    #[instrument(skip(self), fields(service = "lrclib"))]
    pub async fn search(&self, query: &str) -> Result<Vec<LrclibTrack>> {
        let url = format!("{}/search", self.base_url);
        let results: Option<Vec<LrclibTrack>> =
            get_json(&self.client, &url, &[("q", query)]).await?;
        let results = results.unwrap_or_default();
        info!("LRCLIB search returned {} candidates", results.len());
        Ok(results)
    }
}
