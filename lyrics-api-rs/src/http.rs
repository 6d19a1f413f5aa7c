use crate::error::{LyricsApiError, Result};
use crate::models::HttpSettings;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Build a client honouring the connect and total timeouts.
pub fn build_client(settings: &HttpSettings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(settings.user_agent.clone())
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.timeout)
        .build()?)
}

/// Percent-encode one path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// GET `url` and decode the JSON body.
///
/// A 404 is the upstream's ordinary "not found" answer and yields `Ok(None)`;
/// any other non-success status is an error.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Option<T>> {
    debug!("GET {} {:?}", url, query);

    let mut request = client.get(url);
    if !query.is_empty() {
        request = request.query(query);
    }
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        debug!("{} answered 404", url);
        return Ok(None);
    }

    if !status.is_success() {
        warn!("{} answered {}", url, status);
        return Err(LyricsApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    debug!("Response received, length: {} bytes", body.len());

    if body.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&body)?;
    Ok(Some(value))
}
