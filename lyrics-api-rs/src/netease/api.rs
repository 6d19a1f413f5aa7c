use crate::error::{LyricsApiError, Result};
use crate::http::{build_client, get_json};
use crate::models::HttpSettings;
use crate::netease::models::{LyricResult, SearchEnvelope, Song};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://music.163.com";

/// NetEase Cloud Music client over the public, unencrypted endpoints
#[derive(Debug, Clone)]
pub struct NetEaseApi {
    client: Client,
    base_url: String,
}

impl NetEaseApi {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(settings: &HttpSettings, base_url: impl Into<String>) -> Result<Self> {
        info!("Initializing NetEase Music API client");
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// First song matching `keywords`
    #[instrument(skip(self), fields(service = "netease"))]
    pub async fn search_song(&self, keywords: &str) -> Result<Option<Song>> {
        let url = format!("{}/api/search/song", self.base_url);
        let envelope: Option<SearchEnvelope> =
            get_json(&self.client, &url, &[("keywords", keywords)]).await?;

        let Some(envelope) = envelope else {
            return Ok(None);
        };

        if envelope.code != 0 && envelope.code != 200 {
            warn!("Search failed, code: {}", envelope.code);
            return Err(LyricsApiError::Api(format!(
                "NetEase search answered code {}",
                envelope.code
            )));
        }

        let song = envelope.result.and_then(|r| r.songs.into_iter().next());
        match &song {
            Some(s) => info!("Search successful, first song id {}", s.id),
            None => debug!("Search returned no songs"),
        }
        Ok(song)
    }

    /// Original-language LRC text for a song id
    #[instrument(skip(self), fields(service = "netease"))]
    pub async fn lyric(&self, song_id: &str) -> Result<Option<String>> {
        let url = format!("{}/api/song/lyric", self.base_url);
        let result: Option<LyricResult> =
            get_json(&self.client, &url, &[("id", song_id), ("lv", "-1")]).await?;

        let Some(result) = result else {
            return Ok(None);
        };

        if result.code != 0 && result.code != 200 {
            warn!("Lyric fetch failed, code: {}", result.code);
            return Ok(None);
        }

        info!(
            "Lyrics retrieval complete. Original: {}, Translation: {}",
            result.lrc.is_some(),
            result.tlyric.is_some()
        );

        Ok(result
            .lrc
            .map(|l| l.lyric)
            .filter(|l| !l.trim().is_empty()))
    }
}
