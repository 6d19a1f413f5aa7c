pub mod chartlyrics;
pub mod error;
pub mod http;
pub mod lrclib;
pub mod models;
pub mod netease;
pub mod plaintext;
pub mod textyl;

use async_trait::async_trait;
pub use chartlyrics::ChartLyricsApi;
pub use error::{LyricsApiError, Result};
pub use lrclib::LrclibApi;
pub use models::*;
pub use netease::NetEaseApi;
pub use plaintext::PlainTextApi;
pub use textyl::TextylApi;

/// Unified lookup over every upstream
///
/// `Ok(None)` means the upstream answered and has nothing for this track;
/// `Err` means the call itself failed.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    fn service(&self) -> Service;

    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>>;
}

#[async_trait]
impl LyricsApi for LrclibApi {
    fn service(&self) -> Service {
        Service::Lrclib
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>> {
        let track = self.get(title, artist).await?;
        Ok(track.map(|t| t.convert()).filter(|t| !t.is_empty()))
    }
}

#[async_trait]
impl LyricsApi for TextylApi {
    fn service(&self) -> Service {
        Service::Textyl
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>> {
        let query = format!("{} {}", artist, title);
        let lines = self.lyrics(query.trim()).await?;
        if lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(LyricsText {
            service: Some(Service::Textyl),
            synced: Some(textyl::lines_to_lrc(&lines)),
            ..Default::default()
        }))
    }
}

#[async_trait]
impl LyricsApi for PlainTextApi {
    fn service(&self) -> Service {
        PlainTextApi::service(self)
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>> {
        let body = self.lyrics(artist, title).await?;
        Ok(body.map(|b| LyricsText {
            service: Some(PlainTextApi::service(self)),
            plain: b.lyrics,
            track_name: b.title,
            artist_name: b.artist,
            ..Default::default()
        }))
    }
}

#[async_trait]
impl LyricsApi for ChartLyricsApi {
    fn service(&self) -> Service {
        Service::ChartLyrics
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>> {
        let Some(lyric_id) = self.search(artist, title).await? else {
            return Ok(None);
        };
        let Some(body) = self.lyric(&lyric_id).await? else {
            return Ok(None);
        };

        Ok(Some(LyricsText {
            service: Some(Service::ChartLyrics),
            id: Some(lyric_id),
            plain: body.lyric,
            track_name: body.song,
            artist_name: body.artist,
            ..Default::default()
        }))
    }
}

#[async_trait]
impl LyricsApi for NetEaseApi {
    fn service(&self) -> Service {
        Service::NetEase
    }

    /// NetEase text carries LRC tags but is reported as plain lyrics
    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<LyricsText>> {
        let keywords = format!("{} {}", artist, title);
        let Some(song) = self.search_song(keywords.trim()).await? else {
            return Ok(None);
        };
        let Some(lyric) = self.lyric(&song.id).await? else {
            return Ok(None);
        };

        Ok(Some(LyricsText {
            service: Some(Service::NetEase),
            plain: Some(lyric),
            artist_name: Some(song.artist_names()).filter(|s| !s.is_empty()),
            album_name: song.album.as_ref().map(|a| a.name.clone()),
            id: Some(song.id),
            track_name: Some(song.name),
            ..Default::default()
        }))
    }
}

/// Build a client for `service` against its public endpoint
pub fn client_for(service: Service, settings: &HttpSettings) -> Result<Box<dyn LyricsApi>> {
    Ok(match service {
        Service::Lrclib => Box::new(LrclibApi::new(settings)?),
        Service::Textyl => Box::new(TextylApi::new(settings)?),
        Service::LyricsOvh => Box::new(PlainTextApi::lyrics_ovh(settings)?),
        Service::Lyrist => Box::new(PlainTextApi::lyrist(settings)?),
        Service::ChartLyrics => Box::new(ChartLyricsApi::new(settings)?),
        Service::NetEase => Box::new(NetEaseApi::new(settings)?),
    })
}
