//! Downloader collaborator: one external-tool invocation per URL.

use anyhow::{anyhow, Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Completion-tracking file the downloader maintains inside each output
/// directory. Opaque to ytsub except that the organizer must leave it alone.
pub const ARCHIVE_FILE: &str = "_archive.txt";

/// Seam for the external download tool, so the orchestrator (and tests) can
/// substitute an implementation. Dyn-compatible so the scheduler can hold an
/// `Arc<dyn Downloader>` across spawned passes.
pub trait Downloader: Send + Sync {
    /// Downloads everything behind `url` into `out_dir` with the given
    /// flags. Success means the tool exited zero; anything else (including
    /// spawn failure) is a per-URL error.
    fn download<'a>(
        &'a self,
        out_dir: &'a Path,
        args: &'a [String],
        url: &'a str,
    ) -> BoxFuture<'a, Result<()>>;
}

/// Production downloader: spawns `yt-dlp` (or whatever binary is configured)
/// with inherited stdio, the output-directory flag, and the archive flag.
pub struct YtDlp {
    bin: String,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>) -> YtDlp {
        YtDlp { bin: bin.into() }
    }
}

impl Downloader for YtDlp {
    fn download<'a>(
        &'a self,
        out_dir: &'a Path,
        args: &'a [String],
        url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            let archive = out_dir.join(ARCHIVE_FILE);
            let status = Command::new(&self.bin)
                .arg("-P")
                .arg(out_dir)
                .arg("--download-archive")
                .arg(&archive)
                .args(args)
                .arg(url)
                .current_dir(out_dir)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .with_context(|| format!("spawning {}", self.bin))?;

            if !status.success() {
                return Err(anyhow!("{} exited with {}", self.bin, status));
            }
            Ok(())
        }
        .boxed()
    }
}
