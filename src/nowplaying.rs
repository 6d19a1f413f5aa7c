//! Keeps lyrics in step with the now-playing song
//!
//! Every song change starts a lookup tagged with a fresh request id. Only the
//! newest request may publish its outcome, so a slow lookup for a song that
//! is no longer playing never overwrites the current view.

use crate::lyrics::LyricsResult;
use crate::lyrics::identity::song_id;
use crate::lyrics::lrc::{LrcLine, ParsedLrc};
use crate::lyrics::service::{LookupError, LyricsService};
use crate::media::{MediaState, NowPlayingSubscription};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "lyrics", rename_all = "snake_case")]
pub enum LyricsState {
    Idle,
    Loading,
    Ready(LyricsResult),
    NotFound,
    TimedOut,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsView {
    pub request_id: u64,
    pub song_id: Option<String>,
    pub state: LyricsState,
    #[serde(skip)]
    pub parsed: Option<Arc<ParsedLrc>>,
    /// Song this view is for; distinct songs may share a `song_id`
    #[serde(skip)]
    pub query: Option<String>,
}

impl LyricsView {
    fn idle() -> Self {
        Self {
            request_id: 0,
            song_id: None,
            state: LyricsState::Idle,
            parsed: None,
            query: None,
        }
    }

    pub fn result(&self) -> Option<&LyricsResult> {
        match &self.state {
            LyricsState::Ready(result) => Some(result),
            _ => None,
        }
    }
}

pub struct LyricsFollower {
    service: Arc<LyricsService>,
    latest_request: AtomicU64,
    view: watch::Sender<LyricsView>,
}

impl LyricsFollower {
    pub fn new(service: Arc<LyricsService>) -> Arc<Self> {
        let (view, _) = watch::channel(LyricsView::idle());
        Arc::new(Self {
            service,
            latest_request: AtomicU64::new(0),
            view,
        })
    }

    pub fn view(&self) -> LyricsView {
        self.view.borrow().clone()
    }

    pub fn watch_view(&self) -> watch::Receiver<LyricsView> {
        self.view.subscribe()
    }

    /// Drive the follower from a hub subscription until the hub goes away
    pub fn spawn(self: Arc<Self>, mut subscription: NowPlayingSubscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.on_media(&subscription.current().state);
            while let Some(now_playing) = subscription.changed().await {
                self.on_media(&now_playing.state);
            }
            tracing::debug!("Now-playing hub closed, lyrics follower exiting");
        })
    }

    /// React to one media event. Returns the request id when a lookup started.
    pub fn on_media(self: &Arc<Self>, state: &MediaState) -> Option<u64> {
        let query = state.query_key()?;
        if self.view.borrow().query.as_deref() == Some(query.as_str()) {
            return None;
        }
        let (artist, title) = state.artist_and_title()?;
        Some(self.request(artist.to_string(), title.to_string(), query))
    }

    fn request(self: &Arc<Self>, artist: String, title: String, query: String) -> u64 {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let song_id = song_id(&artist, &title);
        tracing::info!("Lyrics request #{} for '{}' by '{}' ({})", request_id, title, artist, song_id);

        self.view.send_replace(LyricsView {
            request_id,
            song_id: Some(song_id.clone()),
            state: LyricsState::Loading,
            parsed: None,
            query: Some(query.clone()),
        });

        let follower = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = follower.service.lookup(&artist, &title).await;
            follower.complete(request_id, song_id, query, outcome);
        });

        request_id
    }

    fn complete(
        &self,
        request_id: u64,
        song_id: String,
        query: String,
        outcome: Result<LyricsResult, LookupError>,
    ) {
        let (state, parsed) = match outcome {
            Ok(result) => {
                let parsed = result.parse_synced().map(Arc::new);
                (LyricsState::Ready(result), parsed)
            }
            Err(LookupError::NotFound { .. }) => (LyricsState::NotFound, None),
            Err(LookupError::TimedOut { .. }) => (LyricsState::TimedOut, None),
            Err(e) => (LyricsState::Failed(e.to_string()), None),
        };

        let published = self.view.send_if_modified(|view| {
            if self.latest_request.load(Ordering::SeqCst) != request_id {
                return false;
            }
            *view = LyricsView {
                request_id,
                song_id: Some(song_id.clone()),
                state: state.clone(),
                parsed: parsed.clone(),
                query: Some(query.clone()),
            };
            true
        });

        if !published {
            tracing::debug!("Discarding stale lyrics result #{} for {}", request_id, song_id);
        }
    }

    /// Synced line for the current song at `position_ms`
    pub fn current_line(&self, position_ms: i64) -> Option<LrcLine> {
        let view = self.view.borrow();
        view.parsed.as_ref()?.line_at_ms(position_ms).cloned()
    }
}
