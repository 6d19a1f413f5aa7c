use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::lyrics::LyricsResult;
use crate::lyrics::fetcher::Resolution;
use crate::lyrics::lrc::{LrcLine, ParsedLrc};
use crate::lyrics::service::{LookupError, LyricsService};
use crate::media::{MediaState, NowPlayingHub, TransportControl};
use crate::nowplaying::{LyricsFollower, LyricsView};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LyricsService>,
    pub hub: Arc<NowPlayingHub>,
    pub follower: Arc<LyricsFollower>,
    pub transport: Arc<dyn TransportControl>,
}

impl AppState {
    pub fn new(service: Arc<LyricsService>, transport: Arc<dyn TransportControl>) -> Self {
        let follower = LyricsFollower::new(service.clone());
        Self {
            service,
            hub: Arc::new(NowPlayingHub::new()),
            follower,
            transport,
        }
    }

    /// Start following the hub; lyrics lookups begin on song changes
    pub fn start_follower(&self) -> JoinHandle<()> {
        self.follower.clone().spawn(self.hub.subscribe())
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/lyrics", get(get_lyrics))
        .route("/lyrics/resolve", get(resolve_lyrics))
        .route("/lyrics/lines", get(get_lyric_lines))
        .route("/lyrics/parse", post(parse_lyrics))
        .route("/lyrics/cache", axum::routing::delete(clear_cache))
        .route(
            "/lyrics/cache/:song_id",
            get(get_cached_lyrics).delete(delete_cached_lyrics),
        )
        .route("/now-playing", get(get_now_playing).post(publish_now_playing))
        .route("/now-playing/line", get(get_current_line))
        .route("/transport/:action", post(transport_command))
        .route("/providers", get(list_providers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Lyrics Station API v0.1.0"
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn error_response(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message: message.into(),
        }),
    )
        .into_response()
}

fn lookup_error_response(err: LookupError) -> Response {
    let message = err.to_string();
    match err {
        LookupError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, "not_found", message),
        LookupError::TimedOut { .. } => {
            error_response(StatusCode::GATEWAY_TIMEOUT, "timed_out", message)
        }
        LookupError::EmptyQuery => error_response(StatusCode::BAD_REQUEST, "empty_query", message),
        LookupError::Cache(_) => {
            tracing::error!("{}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "cache_error", message)
        }
    }
}

#[derive(Debug, Deserialize)]
struct SongQuery {
    #[serde(default)]
    artist: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    refresh: bool,
}

/// Lyrics for a song, from the cache or the providers
async fn get_lyrics(
    State(state): State<AppState>,
    Query(query): Query<SongQuery>,
) -> Result<Json<LyricsResult>, Response> {
    tracing::debug!(
        "Fetching lyrics: artist='{}', title='{}', refresh={}",
        query.artist,
        query.title,
        query.refresh
    );

    let result = if query.refresh {
        state.service.refresh(&query.artist, &query.title).await
    } else {
        state.service.lookup(&query.artist, &query.title).await
    };

    result.map(Json).map_err(lookup_error_response)
}

/// Uncached resolve with the per-call report
async fn resolve_lyrics(
    State(state): State<AppState>,
    Query(query): Query<SongQuery>,
) -> Result<Json<Resolution>, Response> {
    state
        .service
        .diagnose(&query.artist, &query.title)
        .await
        .map(Json)
        .map_err(lookup_error_response)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineResponse {
    time_ms: u64,
    text: String,
}

impl From<&LrcLine> for LineResponse {
    fn from(line: &LrcLine) -> Self {
        Self {
            time_ms: line.timestamp_ms(),
            text: line.text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParsedResponse {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    author: Option<String>,
    offset_ms: Option<i64>,
    lines: Vec<LineResponse>,
}

impl From<&ParsedLrc> for ParsedResponse {
    fn from(parsed: &ParsedLrc) -> Self {
        Self {
            title: parsed.title.clone(),
            artist: parsed.artist.clone(),
            album: parsed.album.clone(),
            author: parsed.author.clone(),
            offset_ms: parsed.offset_ms,
            lines: parsed.lines.iter().map(LineResponse::from).collect(),
        }
    }
}

/// Timed lines of a song's synced lyrics
async fn get_lyric_lines(
    State(state): State<AppState>,
    Query(query): Query<SongQuery>,
) -> Result<Json<ParsedResponse>, Response> {
    let result = state
        .service
        .lookup(&query.artist, &query.title)
        .await
        .map_err(lookup_error_response)?;

    let parsed = LyricsService::parsed(&result).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            "not_synced",
            format!("{} has plain lyrics only", result.song_id),
        )
    })?;

    Ok(Json(ParsedResponse::from(&parsed)))
}

/// Parse an LRC document sent as the request body
async fn parse_lyrics(body: String) -> Result<Json<ParsedResponse>, Response> {
    if !crate::lyrics::lrc::is_valid_lrc(&body) {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_lrc",
            "no [mm:ss.xx] timestamp found",
        ));
    }

    let parsed = ParsedLrc::parse(&body);
    tracing::debug!("Parsed {} LRC lines", parsed.len());
    Ok(Json(ParsedResponse::from(&parsed)))
}

async fn get_cached_lyrics(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
) -> Result<Json<LyricsResult>, StatusCode> {
    state
        .service
        .cache()
        .get(&song_id)
        .await
        .map_err(|e| {
            tracing::error!("Error reading cache for {}: {:#}", song_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_cached_lyrics(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
) -> StatusCode {
    match state.service.cache().remove(&song_id).await {
        Ok(true) => {
            tracing::info!("Removed cached lyrics for {}", song_id);
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!("Error removing cached lyrics for {}: {:#}", song_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    match state.service.cache().clear().await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::error!("Error clearing lyrics cache: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NowPlayingResponse {
    media: MediaState,
    song_id: Option<String>,
    position_ms: i64,
    lyrics: LyricsView,
}

async fn get_now_playing(State(state): State<AppState>) -> Json<NowPlayingResponse> {
    let now_playing = state.hub.current();
    Json(NowPlayingResponse {
        song_id: now_playing.state.song_key(),
        position_ms: now_playing.position_ms(),
        media: now_playing.state,
        lyrics: state.follower.view(),
    })
}

/// Media-session event from the host
async fn publish_now_playing(
    State(state): State<AppState>,
    Json(media): Json<MediaState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let song_id = media.song_key();
    if song_id.is_none() {
        tracing::debug!("Media event without artist/title, lyrics unchanged");
    }
    state.hub.publish(media);
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "songId": song_id })),
    )
}

#[derive(Debug, Deserialize)]
struct LineQuery {
    position_ms: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentLineResponse {
    song_id: Option<String>,
    position_ms: i64,
    index: Option<usize>,
    line: Option<LineResponse>,
}

/// Synced line at the given (or extrapolated) playback position
async fn get_current_line(
    State(state): State<AppState>,
    Query(query): Query<LineQuery>,
) -> Result<Json<CurrentLineResponse>, StatusCode> {
    let view = state.follower.view();
    let Some(parsed) = view.parsed.as_ref() else {
        tracing::debug!("No synced lyrics for {:?}", view.song_id);
        return Err(StatusCode::NOT_FOUND);
    };

    let position_ms = query
        .position_ms
        .unwrap_or_else(|| state.hub.current().position_ms());
    let index = parsed.line_index_at_ms(position_ms);

    Ok(Json(CurrentLineResponse {
        song_id: view.song_id.clone(),
        position_ms,
        index,
        line: index.map(|i| LineResponse::from(&parsed.lines[i])),
    }))
}

#[derive(Debug, Deserialize)]
struct TransportQuery {
    position_ms: Option<i64>,
}

async fn transport_command(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Query(query): Query<TransportQuery>,
) -> StatusCode {
    let transport = &state.transport;
    let result = match action.as_str() {
        "play" => transport.play().await,
        "pause" => transport.pause().await,
        "next" => transport.next().await,
        "previous" => transport.previous().await,
        "seek" => match query.position_ms {
            Some(position_ms) => transport.seek(position_ms).await,
            None => return StatusCode::BAD_REQUEST,
        },
        _ => {
            tracing::warn!("Unknown transport action: {}", action);
            return StatusCode::BAD_REQUEST;
        }
    };

    match result {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::error!("Transport {} failed: {:#}", action, e);
            StatusCode::BAD_GATEWAY
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProvidersQuery {
    #[serde(default)]
    health: bool,
}

#[derive(Debug, Serialize)]
struct ProviderInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    healthy: Option<bool>,
}

/// Registered providers, optionally with a live health check
async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<ProvidersQuery>,
) -> Json<Vec<ProviderInfo>> {
    let aggregator = state.service.aggregator();

    if query.health {
        let health = aggregator.health_check_all().await;
        let mut providers: Vec<ProviderInfo> = health
            .into_iter()
            .map(|(name, healthy)| ProviderInfo {
                name,
                healthy: Some(healthy),
            })
            .collect();
        // Search providers have no health check of their own
        for name in aggregator.provider_names().into_iter().skip(providers.len()) {
            providers.push(ProviderInfo {
                name: name.to_string(),
                healthy: None,
            });
        }
        return Json(providers);
    }

    Json(
        aggregator
            .provider_names()
            .into_iter()
            .map(|name| ProviderInfo {
                name: name.to_string(),
                healthy: None,
            })
            .collect(),
    )
}
