//! One orchestration pass: reparse the document, download, organize.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::downloader::Downloader;
use crate::organizer;
use crate::subscription::SubscriptionSet;

/// Runs one full pass over the document at `doc_path`, with each
/// subscription's output directory created under `base_dir`.
///
/// The document is re-read from disk so edits between passes take effect.
/// Subscriptions and their URLs run strictly in order, one at a time; a
/// failed download is logged and the pass moves on to the next URL. The
/// organizer runs once per subscription after all its URLs, whether or not
/// they succeeded.
pub async fn run_pass(
    doc_path: &Path,
    base_dir: &Path,
    downloader: Arc<dyn Downloader>,
) -> Result<()> {
    let set = SubscriptionSet::load(doc_path)?;
    tracing::info!(
        "pass started: {} subscription(s)",
        set.subscriptions.len()
    );

    for sub in &set.subscriptions {
        let out_dir = base_dir.join(&sub.name);
        tokio::fs::create_dir_all(&out_dir)
            .await
            .with_context(|| format!("creating {}", out_dir.display()))?;

        for url in &sub.urls {
            match downloader.download(&out_dir, &sub.arguments, url).await {
                Ok(()) => tracing::info!("[{}] downloaded {}", sub.name, url),
                Err(err) => {
                    tracing::error!("[{}] download failed for {}: {:#}", sub.name, url, err)
                }
            }
        }

        match organizer::organize_dir(&out_dir, &sub.organize).await {
            Ok(0) => {}
            Ok(moved) => tracing::info!("[{}] organized {} file(s)", sub.name, moved),
            Err(err) => tracing::error!("[{}] organize failed: {:#}", sub.name, err),
        }
    }

    Ok(())
}
