use clap::Parser;
use lyrics_api_rs::{client_for, HttpSettings, LrclibApi, Service};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Lyrics API probe
///
/// Query one upstream lyrics service directly, without any fallback, to see
/// exactly what it answers for a track.
#[derive(Parser, Debug)]
#[command(name = "lyrics_api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Service to query: lrclib, textyl, lyrics.ovh, lyrist, chartlyrics, netease
    #[arg(short, long, value_name = "SERVICE", default_value = "lrclib")]
    service: String,

    /// Artist name
    #[arg(short, long)]
    artist: String,

    /// Track title
    #[arg(short, long)]
    title: String,

    /// Use LRCLIB's fuzzy search instead of an exact lookup
    #[arg(long)]
    search: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LYRICS_HTTP_TIMEOUT", default_value = "12")]
    timeout: u64,

    /// Write the lyrics text to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls verbosity; warnings and errors only by default
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();

    let Some(service) = Service::parse(&args.service) else {
        eprintln!(
            "Invalid service: '{}'. Use one of: {}",
            args.service,
            Service::ALL.map(|s| s.as_str()).join(", ")
        );
        return Ok(());
    };

    let settings = HttpSettings {
        timeout: Duration::from_secs(args.timeout),
        ..HttpSettings::default()
    };

    if args.search {
        if service != Service::Lrclib {
            eprintln!("--search is only supported by lrclib");
            return Ok(());
        }
        let api = LrclibApi::new(&settings)?;
        let query = format!("{} {}", args.artist, args.title);
        let results = api.search(query.trim()).await?;

        if results.is_empty() {
            println!("No results found.");
            return Ok(());
        }

        println!("{:<4} {:<10} {:<40} {:<30} {:<6}", "No.", "Id", "Track", "Artist", "Synced");
        println!("{}", "-".repeat(94));
        for (idx, track) in results.iter().enumerate() {
            println!(
                "{:<4} {:<10} {:<40} {:<30} {:<6}",
                idx + 1,
                track.id.map(|id| id.to_string()).unwrap_or_default(),
                truncate(track.track_name.as_deref().unwrap_or(""), 38),
                truncate(track.artist_name.as_deref().unwrap_or(""), 28),
                if track.synced_lyrics.is_some() { "yes" } else { "no" }
            );
        }
        return Ok(());
    }

    let api = client_for(service, &settings)?;
    println!("Querying {} for '{}' by '{}'...\n", service.display_name(), args.title, args.artist);

    let Some(text) = api.lookup(&args.artist, &args.title).await? else {
        println!("No lyrics found.");
        return Ok(());
    };

    let (kind, content) = match (&text.synced, &text.plain) {
        (Some(synced), _) => ("synced", synced),
        (None, Some(plain)) => ("plain", plain),
        (None, None) => {
            println!("No lyrics found.");
            return Ok(());
        }
    };

    if let Some(name) = &text.track_name {
        println!("Matched track: {}", name);
    }
    if let Some(artist) = &text.artist_name {
        println!("Matched artist: {}", artist);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, content)?;
            println!("✓ Saved {} lyrics to: {}", kind, path.display());
        }
        None => {
            println!("--- {} lyrics ---", kind);
            println!("{}", content);
        }
    }

    Ok(())
}

/// Safely truncate UTF-8 strings by character count
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
