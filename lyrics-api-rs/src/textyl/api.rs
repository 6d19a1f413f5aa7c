use crate::error::Result;
use crate::http::{build_client, get_json};
use crate::models::HttpSettings;
use crate::textyl::models::TextylLine;
use reqwest::Client;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.textyl.co/api/lyrics";

/// Textyl client; a single combined `"{artist} {title}"` query
#[derive(Debug, Clone)]
pub struct TextylApi {
    client: Client,
    base_url: String,
}

impl TextylApi {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(settings: &HttpSettings, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self), fields(service = "textyl"))]
    pub async fn lyrics(&self, query: &str) -> Result<Vec<TextylLine>> {
        let lines: Option<Vec<TextylLine>> =
            get_json(&self.client, &self.base_url, &[("q", query)]).await?;
        let lines = lines.unwrap_or_default();
        info!("Textyl returned {} timed lines", lines.len());
        Ok(lines)
    }
}
