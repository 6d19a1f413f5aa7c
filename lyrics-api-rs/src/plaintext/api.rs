use crate::error::Result;
use crate::http::{build_client, get_json, segment};
use crate::models::{non_blank, HttpSettings, Service};
use crate::plaintext::models::PlainLyricsBody;
use reqwest::Client;
use tracing::{debug, info, instrument};

pub const LYRICS_OVH_BASE_URL: &str = "https://api.lyrics.ovh/v1";
pub const LYRIST_BASE_URL: &str = "https://lyrist.vercel.app/api";

/// Client for the path-addressed plain-text services (`{base}/{artist}/{title}`)
#[derive(Debug, Clone)]
pub struct PlainTextApi {
    service: Service,
    client: Client,
    base_url: String,
}

impl PlainTextApi {
    pub fn lyrics_ovh(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(Service::LyricsOvh, settings, LYRICS_OVH_BASE_URL)
    }

    pub fn lyrist(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(Service::Lyrist, settings, LYRIST_BASE_URL)
    }

    pub fn with_base_url(
        service: Service,
        settings: &HttpSettings,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            service,
            client: build_client(settings)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    #[instrument(skip(self), fields(service = self.service.as_str()))]
    pub async fn lyrics(&self, artist: &str, title: &str) -> Result<Option<PlainLyricsBody>> {
        let url = format!("{}/{}/{}", self.base_url, segment(artist), segment(title));
        let body: Option<PlainLyricsBody> = get_json(&self.client, &url, &[]).await?;

        let Some(mut body) = body else {
            return Ok(None);
        };
        if let Some(error) = &body.error {
            debug!("{} reported: {}", self.service.as_str(), error);
        }
        body.lyrics = non_blank(body.lyrics);
        if body.lyrics.is_none() {
            return Ok(None);
        }

        info!("{} returned plain lyrics", self.service.as_str());
        Ok(Some(body))
    }
}
