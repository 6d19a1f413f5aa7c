use anyhow::{Context, Result};
use clap::Parser;
use lyrics_station::config::LyricsArgs;
use lyrics_station::lyrics::api_provider::default_aggregator;
use lyrics_station::lyrics::cache::LyricsCache;
use lyrics_station::lyrics::service::LyricsService;
use lyrics_station::media::NoopTransport;
use lyrics_station::server::{self, AppState};
use lyrics_station::store::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lyrics-station")]
#[command(about = "Lyrics Station Server", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "LYRICS_STATION_PORT", default_value = "3000")]
    port: u16,

    /// SQLite database holding the lyrics cache
    #[arg(long, env = "LYRICS_STATION_DB", default_value = "./.lyrics-station/store.db")]
    db: PathBuf,

    #[command(flatten)]
    lyrics: LyricsArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();
    let config = cli.lyrics.to_config();

    tracing::info!("Starting Lyrics Station");
    tracing::info!("Store: {}", cli.db.display());

    let store = SqliteStore::open(&cli.db)
        .await
        .context("Failed to open lyrics store")?;
    let cache = Arc::new(LyricsCache::new(Arc::new(store)));

    let aggregator = default_aggregator(&config).context("Failed to set up lyrics providers")?;
    tracing::info!("Providers: {}", aggregator.provider_names().join(", "));

    let service = Arc::new(LyricsService::new(aggregator, cache, config.resolve_timeout));
    let state = AppState::new(service, Arc::new(NoopTransport));
    let _follower = state.start_follower();

    let app = server::create_router(state);
    let addr = format!("0.0.0.0:{}", cli.port);

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET    /lyrics?artist=&title=[&refresh=true]");
    tracing::info!("  GET    /lyrics/resolve?artist=&title=  - per-provider report");
    tracing::info!("  GET    /lyrics/lines?artist=&title=    - timed lines");
    tracing::info!("  POST   /lyrics/parse                   - parse an LRC body");
    tracing::info!("  GET    /lyrics/cache/:song_id          - cached entry (DELETE removes)");
    tracing::info!("  POST   /now-playing                    - media-session event");
    tracing::info!("  GET    /now-playing                    - media state and lyrics");
    tracing::info!("  GET    /now-playing/line?position_ms=  - current synced line");
    tracing::info!("  POST   /transport/:action              - play/pause/next/previous/seek");
    tracing::info!("  GET    /providers[?health=true]");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
