use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream lyrics service enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Lrclib,
    Textyl,
    LyricsOvh,
    Lyrist,
    ChartLyrics,
    NetEase,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Lrclib => "lrclib",
            Service::Textyl => "textyl",
            Service::LyricsOvh => "lyrics.ovh",
            Service::Lyrist => "lyrist",
            Service::ChartLyrics => "chartlyrics",
            Service::NetEase => "netease",
        }
    }

    /// Human readable name, used as the `source` of fetched lyrics
    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Lrclib => "LRCLIB",
            Service::Textyl => "Textyl",
            Service::LyricsOvh => "Lyrics.ovh",
            Service::Lyrist => "Lyrist",
            Service::ChartLyrics => "ChartLyrics",
            Service::NetEase => "NetEase",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lrclib" => Some(Service::Lrclib),
            "textyl" => Some(Service::Textyl),
            "lyrics.ovh" | "lyricsovh" | "ovh" => Some(Service::LyricsOvh),
            "lyrist" => Some(Service::Lyrist),
            "chartlyrics" | "chart" => Some(Service::ChartLyrics),
            "netease" | "ne" | "163" => Some(Service::NetEase),
            _ => None,
        }
    }

    pub const ALL: [Service; 6] = [
        Service::Lrclib,
        Service::Textyl,
        Service::LyricsOvh,
        Service::Lyrist,
        Service::ChartLyrics,
        Service::NetEase,
    ];
}

/// Transport settings shared by every client
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    /// Total budget for one request, connect included
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(12),
            user_agent: concat!("lyrics-api-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Lyrics text as returned by one upstream, before any normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricsText {
    pub service: Option<Service>,
    /// Provider-specific identifier, when the upstream has one
    pub id: Option<String>,
    pub plain: Option<String>,
    /// Raw LRC text
    pub synced: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
}

impl LyricsText {
    pub fn is_empty(&self) -> bool {
        self.plain.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.synced.as_deref().is_none_or(|s| s.trim().is_empty())
    }
}

/// Returns `None` for missing or whitespace-only strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
