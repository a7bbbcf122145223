//! CLI for the ytsub subscription runner.

mod example;

use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ytsub_core::config;
use ytsub_core::downloader::YtDlp;
use ytsub_core::interval::parse_interval;
use ytsub_core::scheduler::Scheduler;
use ytsub_core::subscription::SubscriptionSet;

/// Top-level CLI for the ytsub subscription runner.
#[derive(Debug, Parser)]
#[command(name = "ytsub")]
#[command(about = "ytsub: recurring yt-dlp subscription runner", long_about = None)]
pub struct Cli {
    /// Path to subscriptions.txt, or a directory containing one
    /// (default: ./subscriptions.txt).
    pub path: Option<PathBuf>,

    /// Re-run every INTERVAL (e.g. "2h30m", "90s", "1d", or plain seconds).
    #[arg(short = 't', long = "interval", value_name = "INTERVAL")]
    pub interval: Option<String>,

    /// Parse the subscriptions file and print the result without downloading.
    #[arg(long)]
    pub dry: bool,

    /// Create an example subscriptions.txt in the current directory.
    #[arg(short, long)]
    pub create: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        Cli::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        if self.create {
            return example::create_example();
        }

        // Startup fatals come first: a missing document or a bad interval
        // aborts before any pass.
        let doc_path = resolve_document_path(self.path.as_deref());
        if !doc_path.is_file() {
            bail!("subscriptions file not found at {}", doc_path.display());
        }
        let every = self.interval.as_deref().map(parse_interval).transpose()?;

        if self.dry {
            let set = SubscriptionSet::load(&doc_path)?;
            println!("{:#?}", set);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let base_dir = doc_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let downloader = Arc::new(YtDlp::new(cfg.downloader_bin));
        let scheduler = Scheduler::new(doc_path, base_dir, downloader);

        match every {
            Some(every) => scheduler.run_every(every).await,
            None => scheduler.run_once().await,
        }
    }
}

/// Default is `subscriptions.txt` in the current directory; a directory
/// argument means the `subscriptions.txt` inside it.
fn resolve_document_path(arg: Option<&Path>) -> PathBuf {
    match arg {
        None => PathBuf::from("subscriptions.txt"),
        Some(p) if p.is_dir() => p.join("subscriptions.txt"),
        Some(p) => p.to_path_buf(),
    }
}
