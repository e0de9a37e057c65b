//! keeplist - migrate a Google Keep takeout folder into the Dynalist inbox.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keeplist_delivery::InboxClient;
use keeplist_pipeline::{
    discover_note_files, BucketConfig, HttpBucketStore, Migrator, Outcome, RunStats, TagPlacement,
};

/// Migrate a Google Keep takeout folder into the Dynalist inbox.
///
/// Requires `DYNALIST_TOKEN` in the environment (or a `.env` file).
/// Attachment uploads are enabled when `BUCKET_UPLOAD_URL` is set.
#[derive(Debug, Parser)]
#[command(name = "keeplist", version, about)]
struct Cli {
    /// Path to the Google Keep takeout folder
    takeout: PathBuf,

    /// Where to place label hashtags: "title" (default) or "body".
    /// Falls back to the TAG_PLACEMENT environment variable.
    #[arg(long)]
    tag_placement: Option<TagPlacement>,
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "info")
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("keeplist.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(log_ansi.unwrap_or(false)),
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    }
}

/// Tag placement from the flag, the environment, or the default.
fn resolve_tag_placement(flag: Option<TagPlacement>) -> TagPlacement {
    flag.or_else(|| {
        std::env::var("TAG_PLACEMENT")
            .ok()
            .and_then(|v| v.parse().ok())
    })
    .unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let _file_guard = init_tracing();

    let cli = Cli::parse();

    if !cli.takeout.is_dir() {
        anyhow::bail!("{} is not a directory", cli.takeout.display());
    }

    let tag_placement = resolve_tag_placement(cli.tag_placement);
    info!(takeout = %cli.takeout.display(), %tag_placement, "Starting migration");

    let client = InboxClient::from_env().context("Failed to set up the inbox client")?;
    let mut migrator = Migrator::new(client, &cli.takeout).with_tag_placement(tag_placement);

    match BucketConfig::from_env() {
        Some(config) => match HttpBucketStore::new(config) {
            Ok(store) => {
                info!("Bucket store initialized, attachment uploads enabled");
                migrator = migrator.with_store(Arc::new(store));
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize bucket store, attachment uploads disabled");
            }
        },
        None => {
            warn!("Bucket environment variables not set, attachment uploads disabled");
        }
    }

    let files = discover_note_files(&cli.takeout)?;
    info!(total = files.len(), "Found JSON files to process");

    let mut run = RunStats::new(files.len());
    for (index, path) in files.iter().enumerate() {
        let outcome = migrator.process_file(path).await;
        if let Outcome::Skipped(reason) = &outcome {
            info!(path = %path.display(), %reason, "Note skipped");
        }
        run.record(&outcome);
        info!(
            current = index + 1,
            total = run.total,
            processed = run.processed,
            skipped = run.skipped,
            "Progress"
        );
    }

    let api = migrator.client().stats();
    info!(
        processed = run.processed,
        total = run.total,
        skipped = run.skipped,
        duration_secs = run.elapsed_secs(),
        "Migration finished"
    );
    info!(stats = %api.summary(), "API call statistics");

    Ok(())
}
