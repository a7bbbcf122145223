//! Pass scheduling: run once, or re-run on a fixed interval with an
//! in-flight guard that skips overlapping runs instead of queuing them.

mod guard;
mod pass;

pub use guard::PassGuard;
pub use pass::run_pass;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::downloader::Downloader;

/// Drives `run_pass` either once or on a fixed interval. The in-flight flag
/// is the only concurrency control: a tick that fires while the previous
/// pass is still running is skipped outright.
pub struct Scheduler {
    doc_path: PathBuf,
    base_dir: PathBuf,
    downloader: Arc<dyn Downloader>,
    in_flight: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(doc_path: PathBuf, base_dir: PathBuf, downloader: Arc<dyn Downloader>) -> Scheduler {
        Scheduler {
            doc_path,
            base_dir,
            downloader,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs exactly one pass in the foreground and returns its result.
    pub async fn run_once(&self) -> Result<()> {
        pass::run_pass(&self.doc_path, &self.base_dir, Arc::clone(&self.downloader)).await
    }

    /// Runs passes forever, one per tick, starting immediately. Pass errors
    /// are logged at the pass boundary; nothing stops the loop once started.
    pub async fn run_every(&self, every: Duration) -> Result<()> {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.spawn_pass();
        }
    }

    /// Starts one pass in the background unless one is already in flight, in
    /// which case a notice is logged and nothing is queued.
    pub fn spawn_pass(&self) {
        let Some(guard) = PassGuard::try_acquire(&self.in_flight) else {
            tracing::warn!("previous pass still running; skipping this interval");
            return;
        };
        let doc_path = self.doc_path.clone();
        let base_dir = self.base_dir.clone();
        let downloader = Arc::clone(&self.downloader);
        tokio::spawn(async move {
            let _guard = guard;
            if let Err(err) = pass::run_pass(&doc_path, &base_dir, downloader).await {
                tracing::error!("pass failed: {:#}", err);
            }
        });
    }

    /// Whether a pass is currently in flight.
    pub fn is_pass_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}
