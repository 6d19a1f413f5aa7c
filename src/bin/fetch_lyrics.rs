use anyhow::{Context, Result};
use clap::Parser;
use lyrics_station::config::LyricsArgs;
use lyrics_station::lyrics::LyricsResult;
use lyrics_station::lyrics::api_provider::default_aggregator;
use lyrics_station::lyrics::cache::LyricsCache;
use lyrics_station::lyrics::fetcher::{CallStatus, CallTarget, LyricsAggregator, Resolution};
use lyrics_station::lyrics::providers::MockLyricsProvider;
use lyrics_station::lyrics::service::{LookupError, LyricsService};
use lyrics_station::store::{KeyValueStore, MemoryStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch-lyrics")]
#[command(about = "Resolve lyrics for one song from the public lyrics APIs", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "")]
    artist: String,

    #[arg(short, long)]
    title: String,

    /// Print the synced line at this position (seconds)
    #[arg(short, long)]
    position: Option<f64>,

    /// Print the raw LRC text instead of plain lyrics when available
    #[arg(long)]
    synced: bool,

    /// Print how every provider call went
    #[arg(long)]
    report: bool,

    /// Use the built-in demo catalogue instead of the network
    #[arg(long)]
    offline: bool,

    /// Cache results in this SQLite database
    #[arg(long, env = "LYRICS_STATION_DB")]
    db: Option<PathBuf>,

    /// Write the lyrics into this directory as "ARTIST - TITLE.lrc|txt"
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    lyrics: LyricsArgs,
}

/// Sanitize a string to be safe for use in filenames
fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn print_report(service: &LyricsService, resolution: &Resolution) {
    println!(
        "{} calls for {} (non-Latin: {}) across {} providers:",
        resolution.reports.len(),
        resolution.song_id,
        resolution.non_latin,
        service.aggregator().provider_names().len()
    );
    for report in &resolution.reports {
        let target = match &report.target {
            CallTarget::Lookup { artist, title } => format!("'{}' / '{}'", artist, title),
            CallTarget::Search { query } => format!("search '{}'", query),
        };
        let status = match &report.status {
            CallStatus::Found { count } => format!("found {}", count),
            CallStatus::NotFound => "not found".to_string(),
            CallStatus::Failed { error } => format!("failed: {}", error),
            CallStatus::TimedOut => "timed out".to_string(),
        };
        println!("  {:<14} {:<40} {:>6}ms  {}", report.provider, target, report.elapsed_ms, status);
    }
    if resolution.result.is_none() && resolution.all_calls_failed() {
        println!("Every call failed; the providers look unreachable.");
    }
    println!();
}

fn print_lyrics(result: &LyricsResult, cli: &Cli) {
    println!(
        "# {} - {} ({}{})",
        result.artist_name.as_deref().unwrap_or(&cli.artist),
        result.track_name.as_deref().unwrap_or(&cli.title),
        result.source,
        if result.is_synced { ", synced" } else { "" }
    );

    match (cli.synced, result.synced_text()) {
        (true, Some(lrc)) => println!("{}", lrc),
        _ => println!("{}", result.plain_lyrics),
    }

    if let Some(seconds) = cli.position {
        let position_ms = (seconds * 1000.0).round() as i64;
        match LyricsService::parsed(result) {
            Some(parsed) => match parsed.line_at_ms(position_ms) {
                Some(line) => println!("\n@{:.2}s: {}", seconds, line.text),
                None => println!("\n@{:.2}s: (before the first line)", seconds),
            },
            None => println!("\n@{:.2}s: lyrics are not synced", seconds),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.lyrics.to_config();

    let store: Arc<dyn KeyValueStore> = match &cli.db {
        Some(path) => Arc::new(SqliteStore::open(path).await.context("Failed to open lyrics store")?),
        None => Arc::new(MemoryStore::new()),
    };
    let cache = Arc::new(LyricsCache::new(store));

    let aggregator = if cli.offline {
        let demo = || Box::new(MockLyricsProvider::demo());
        LyricsAggregator::new()
            .with_config(&config)
            .add_provider(demo())
            .add_search_provider(demo())
    } else {
        default_aggregator(&config)?
    };
    let service = LyricsService::new(aggregator, cache, config.resolve_timeout);

    if cli.report {
        let resolution = service.diagnose(&cli.artist, &cli.title).await?;
        print_report(&service, &resolution);
    }

    let result = match service.lookup(&cli.artist, &cli.title).await {
        Ok(result) => result,
        Err(LookupError::NotFound { song_id }) => {
            eprintln!("Lyrics not found for {}, try a different artist or title.", song_id);
            std::process::exit(1);
        }
        Err(LookupError::TimedOut { timeout, .. }) => {
            eprintln!("Gave up after {:?} waiting for the lyrics providers.", timeout);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    print_lyrics(&result, &cli);

    if let Some(dir) = &cli.output {
        tokio::fs::create_dir_all(dir).await?;
        let (extension, content) = match result.synced_text() {
            Some(lrc) => ("lrc", lrc),
            None => ("txt", result.plain_lyrics.as_str()),
        };
        let name = format!(
            "{} - {}.{}",
            sanitize_filename(&cli.artist),
            sanitize_filename(&cli.title),
            extension
        );
        let path = dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\n✓ Saved lyrics to: {}", path.display());
    }

    Ok(())
}
