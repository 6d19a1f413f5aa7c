//! Now-playing state as reported by the host's media session
//!
//! The listener that produces [`MediaState`] events lives outside this crate;
//! it publishes into a [`NowPlayingHub`] owned by the composition root.
//! Consumers subscribe, and unsubscribe by dropping the subscription.

use crate::lyrics::identity::{query_key, song_id};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One media-session event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaState {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork_url: Option<String>,
    pub duration_ms: i64,
    pub position_ms: i64,
    pub is_playing: bool,
    pub source_app: String,
}

impl MediaState {
    /// Song id of the track, or `None` when title or artist is missing.
    /// Such events are not worth a lyrics lookup.
    pub fn song_key(&self) -> Option<String> {
        self.artist_and_title()
            .map(|(artist, title)| song_id(artist, title))
    }

    /// Identity used to tell songs apart, see [`query_key`]
    pub fn query_key(&self) -> Option<String> {
        self.artist_and_title()
            .map(|(artist, title)| query_key(artist, title))
    }

    pub fn artist_and_title(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let artist = self.artist.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((artist, title))
    }
}

/// Latest event plus the instant it arrived, for position extrapolation
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub state: MediaState,
    pub received_at: Instant,
}

impl NowPlaying {
    /// Reported position advanced by the time since the event, while playing
    pub fn position_ms_at(&self, now: Instant) -> i64 {
        if !self.state.is_playing {
            return self.state.position_ms;
        }

        let elapsed = now.saturating_duration_since(self.received_at).as_millis() as i64;
        let position = self.state.position_ms.saturating_add(elapsed);
        if self.state.duration_ms > 0 {
            position.min(self.state.duration_ms)
        } else {
            position
        }
    }

    pub fn position_ms(&self) -> i64 {
        self.position_ms_at(Instant::now())
    }
}

/// Fan-out point for media events
pub struct NowPlayingHub {
    tx: watch::Sender<NowPlaying>,
}

impl NowPlayingHub {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(NowPlaying {
            state: MediaState::default(),
            received_at: Instant::now(),
        });
        Self { tx }
    }

    pub fn publish(&self, state: MediaState) {
        tracing::debug!(
            "Now playing: {:?} by {:?} (playing={}, {}ms)",
            state.title,
            state.artist,
            state.is_playing,
            state.position_ms
        );
        self.tx.send_replace(NowPlaying {
            state,
            received_at: Instant::now(),
        });
    }

    pub fn current(&self) -> NowPlaying {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> NowPlayingSubscription {
        NowPlayingSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NowPlayingHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives every new event; dropping it unsubscribes
pub struct NowPlayingSubscription {
    rx: watch::Receiver<NowPlaying>,
}

impl NowPlayingSubscription {
    /// Wait for the next event. `None` once the hub is gone.
    pub async fn changed(&mut self) -> Option<NowPlaying> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn current(&self) -> NowPlaying {
        self.rx.borrow().clone()
    }

    /// Turn the subscription into a ticker emitting extrapolated positions
    /// every `interval` while playing. Dropping the ticker unsubscribes.
    pub fn ticker(self, interval: Duration) -> PositionTicker {
        PositionTicker::start(self.rx, interval)
    }
}

/// Background task producing playback positions for synced display.
/// It owns the hub subscription and stops when dropped or when the hub goes
/// away.
pub struct PositionTicker {
    positions: mpsc::Receiver<i64>,
    task: JoinHandle<()>,
}

impl PositionTicker {
    fn start(rx: watch::Receiver<NowPlaying>, interval: Duration) -> Self {
        let (tx, positions) = mpsc::channel(4);

        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                if rx.has_changed().is_err() {
                    break;
                }

                let now_playing = rx.borrow().clone();
                if !now_playing.state.is_playing {
                    continue;
                }
                if tx.send(now_playing.position_ms()).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Position ticker stopped");
        });

        Self { positions, task }
    }

    /// Next position in milliseconds; `None` once the ticker has stopped
    pub async fn next(&mut self) -> Option<i64> {
        self.positions.recv().await
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Transport commands forwarded to the media session. Interface only.
#[async_trait]
pub trait TransportControl: Send + Sync {
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn next(&self) -> Result<()>;
    async fn previous(&self) -> Result<()>;
    async fn seek(&self, position_ms: i64) -> Result<()>;
}

/// Accepts and logs every command
pub struct NoopTransport;

#[async_trait]
impl TransportControl for NoopTransport {
    async fn play(&self) -> Result<()> {
        tracing::debug!("transport: play (no media session attached)");
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        tracing::debug!("transport: pause (no media session attached)");
        Ok(())
    }

    async fn next(&self) -> Result<()> {
        tracing::debug!("transport: next (no media session attached)");
        Ok(())
    }

    async fn previous(&self) -> Result<()> {
        tracing::debug!("transport: previous (no media session attached)");
        Ok(())
    }

    async fn seek(&self, position_ms: i64) -> Result<()> {
        tracing::debug!("transport: seek to {}ms (no media session attached)", position_ms);
        Ok(())
    }
}
