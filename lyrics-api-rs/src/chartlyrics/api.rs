use crate::chartlyrics::models::{LyricResponse, SearchResponse};
use crate::error::Result;
use crate::http::{build_client, get_json, segment};
use crate::models::{non_blank, HttpSettings};
use reqwest::Client;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "http://api.chartlyrics.com/apiv1.asmx";

/// ChartLyrics client: search for a lyric id, then fetch the body by id
#[derive(Debug, Clone)]
pub struct ChartLyricsApi {
    client: Client,
    base_url: String,
}

impl ChartLyricsApi {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(settings: &HttpSettings, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the first candidate carrying a usable lyric id
    #[instrument(skip(self), fields(service = "chartlyrics"))]
    pub async fn search(&self, artist: &str, song: &str) -> Result<Option<String>> {
        let url = format!("{}/search", self.base_url);
        let response: Option<SearchResponse> =
            get_json(&self.client, &url, &[("artist", artist), ("song", song)]).await?;

        let id = response.and_then(|r| {
            debug!("ChartLyrics search returned {} candidates", r.results.len());
            r.results
                .iter()
                .find_map(|c| c.usable_id().map(str::to_string))
        });

        if id.is_none() {
            debug!("ChartLyrics search yielded no usable id");
        }
        Ok(id)
    }

    #[instrument(skip(self), fields(service = "chartlyrics"))]
    pub async fn lyric(&self, lyric_id: &str) -> Result<Option<LyricResponse>> {
        let url = format!("{}/Lyric/{}", self.base_url, segment(lyric_id));
        let response: Option<LyricResponse> = get_json(&self.client, &url, &[]).await?;

        Ok(response
            .map(|mut r| {
                r.lyric = non_blank(r.lyric);
                r
            })
            .filter(|r| {
                let usable = r.lyric.is_some();
                if usable {
                    info!("ChartLyrics returned lyric body for id {}", lyric_id);
                }
                usable
            }))
    }
}
