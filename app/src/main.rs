//! Interactive entry point for the Picsum gallery.

mod config;
mod shell;

use api_client::PicsumClient;
use clap::Parser;
use favorites::{FavoritesStore, MemoryStorage, SqliteStorage};
use gallery::GalleryController;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "picsum-gallery",
    author,
    version,
    about = "Browse, filter and favorite Picsum photos"
)]
struct Cli {
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Override the photo API base URL
    #[arg(long)]
    api_base_url: Option<String>,
    /// Override the request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    /// Log span enter and exit events
    #[arg(long)]
    trace_spans: bool,
    /// Directory for favorites and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

fn open_store(data_dir: &std::path::Path) -> FavoritesStore {
    match SqliteStorage::new(&data_dir.join("favorites.sqlite")) {
        Ok(storage) => FavoritesStore::new(storage),
        Err(e) => {
            tracing::warn!("Favorites will not persist this session: {}", e);
            FavoritesStore::new(MemoryStorage::new())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = config::AppConfigOverrides {
        log_level: cli.log_level.clone(),
        api_base_url: cli.api_base_url.clone(),
        request_timeout_secs: cli.timeout_secs,
        trace_spans: cli.trace_spans,
        data_path: cli.data_dir.clone(),
    };
    let cfg = config::AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);
    if cli.save_config {
        cfg.save_to(cli.config.clone())?;
    }
    let base_dir = cfg.data_path.clone();
    std::fs::create_dir_all(&base_dir)?;
    let file_appender = rolling::daily(&base_dir, "picsum-gallery.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let span_events = if cfg.trace_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_span_events(span_events)
        .with_writer(std::io::stderr.and(file_writer))
        .init();

    let client = PicsumClient::with_base_url(cfg.api_base_url.clone())
        .with_timeout(Duration::from_secs(cfg.request_timeout_secs));
    let store = open_store(&base_dir);

    tracing::info!("Loading photos from {}", cfg.api_base_url);
    let mut gallery = GalleryController::start(&client, store).await;
    println!("{}", shell::render_view(&gallery));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(cmd) = shell::Command::parse(&line) else {
            continue;
        };
        match shell::execute(&mut gallery, &client, cmd).await {
            shell::Outcome::Print(text) if text.is_empty() => {}
            shell::Outcome::Print(text) => println!("{}", text),
            shell::Outcome::Quit => break,
        }
    }

    Ok(())
}
