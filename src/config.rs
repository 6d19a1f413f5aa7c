//! Runtime configuration for the lyrics engine

use clap::Args;
use lyrics_api_rs::{HttpSettings, chartlyrics, lrclib, netease, plaintext, textyl};
use std::time::Duration;

/// Base URL of every upstream, overridable so tests can point at stub servers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub lrclib: String,
    pub textyl: String,
    pub lyrics_ovh: String,
    pub lyrist: String,
    pub chartlyrics: String,
    pub netease: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            lrclib: lrclib::DEFAULT_BASE_URL.to_string(),
            textyl: textyl::DEFAULT_BASE_URL.to_string(),
            lyrics_ovh: plaintext::LYRICS_OVH_BASE_URL.to_string(),
            lyrist: plaintext::LYRIST_BASE_URL.to_string(),
            chartlyrics: chartlyrics::DEFAULT_BASE_URL.to_string(),
            netease: netease::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Every upstream under one host, at the conventional sub-paths
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            lrclib: format!("{}/lrclib", base),
            textyl: format!("{}/textyl", base),
            lyrics_ovh: format!("{}/ovh", base),
            lyrist: format!("{}/lyrist", base),
            chartlyrics: format!("{}/chartlyrics", base),
            netease: format!("{}/netease", base),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LyricsConfig {
    /// Budget for each individual provider call
    pub call_timeout: Duration,
    /// Budget for a whole resolve, cache miss to selection
    pub resolve_timeout: Duration,
    pub connect_timeout: Duration,
    /// Ask ChartLyrics and NetEase only for non-Latin input
    pub gate_slow_providers: bool,
    pub user_agent: String,
    pub endpoints: Endpoints,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(12),
            resolve_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(5),
            gate_slow_providers: true,
            user_agent: concat!("lyrics-station/", env!("CARGO_PKG_VERSION")).to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl LyricsConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: self.connect_timeout,
            timeout: self.call_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Engine options shared by the binaries
#[derive(Args, Debug, Clone)]
pub struct LyricsArgs {
    /// Per-provider call timeout in seconds
    #[arg(long, env = "LYRICS_CALL_TIMEOUT", default_value = "12")]
    pub call_timeout: u64,

    /// Whole lookup timeout in seconds
    #[arg(long, env = "LYRICS_RESOLVE_TIMEOUT", default_value = "20")]
    pub resolve_timeout: u64,

    /// Query ChartLyrics and NetEase for Latin-script songs too
    #[arg(long, env = "LYRICS_ALL_PROVIDERS")]
    pub all_providers: bool,

    /// Serve every upstream from one host (e.g. a local mirror or stub)
    #[arg(long, env = "LYRICS_UPSTREAM_BASE")]
    pub upstream_base: Option<String>,

    #[arg(long, env = "LYRICS_LRCLIB_URL")]
    pub lrclib_url: Option<String>,

    #[arg(long, env = "LYRICS_CHARTLYRICS_URL")]
    pub chartlyrics_url: Option<String>,
}

impl LyricsArgs {
    pub fn to_config(&self) -> LyricsConfig {
        let mut endpoints = match &self.upstream_base {
            Some(base) => Endpoints::all_at(base),
            None => Endpoints::default(),
        };
        if let Some(url) = &self.lrclib_url {
            endpoints.lrclib = url.clone();
        }
        if let Some(url) = &self.chartlyrics_url {
            endpoints.chartlyrics = url.clone();
        }

        LyricsConfig {
            call_timeout: Duration::from_secs(self.call_timeout),
            resolve_timeout: Duration::from_secs(self.resolve_timeout),
            gate_slow_providers: !self.all_providers,
            endpoints,
            ..LyricsConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        lyrics: LyricsArgs,
    }

    #[test]
    fn test_defaults() {
        let config = LyricsConfig::default();
        assert_eq!(config.call_timeout, Duration::from_secs(12));
        assert_eq!(config.resolve_timeout, Duration::from_secs(20));
        assert!(config.gate_slow_providers);
        assert_eq!(config.endpoints.lrclib, "https://lrclib.net/api");

        let http = config.http_settings();
        assert_eq!(http.timeout, config.call_timeout);
        assert_eq!(http.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_args_to_config() {
        let cli = TestCli::parse_from([
            "test",
            "--call-timeout",
            "3",
            "--all-providers",
            "--upstream-base",
            "http://127.0.0.1:9000/",
            "--lrclib-url",
            "http://mirror/api",
        ]);
        let config = cli.lyrics.to_config();
        assert_eq!(config.call_timeout, Duration::from_secs(3));
        assert!(!config.gate_slow_providers);
        assert_eq!(config.endpoints.textyl, "http://127.0.0.1:9000/textyl");
        assert_eq!(config.endpoints.lrclib, "http://mirror/api");
    }
}
