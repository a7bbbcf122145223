//! End-to-end pass over a real document in a temp directory, with a fake
//! downloader standing in for yt-dlp.

use anyhow::Result;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ytsub_core::downloader::{Downloader, ARCHIVE_FILE};
use ytsub_core::scheduler::run_pass;

const DOC: &str = "\
-f best
-organize clips: /clip/i

[music]
--no-progress
-organize live: /live/i
----
https://x/1
https://x/2

[talks]
----
https://t/fail
https://t/1
";

#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    dir: PathBuf,
    args: Vec<String>,
    url: String,
}

/// Fake yt-dlp: records every invocation in order and drops a canned file
/// into the output directory per URL. URLs containing "fail" error out.
struct FakeDownloader {
    calls: Mutex<Vec<Invocation>>,
}

impl FakeDownloader {
    fn new() -> FakeDownloader {
        FakeDownloader {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn artifact_for(url: &str) -> Option<&'static str> {
        match url {
            "https://x/1" => Some("Funny CLIP compilation.mp4"),
            "https://x/2" => Some("Live at the venue.mkv"),
            "https://t/1" => Some("quiet talk.webm"),
            _ => None,
        }
    }
}

impl Downloader for FakeDownloader {
    fn download<'a>(
        &'a self,
        out_dir: &'a Path,
        args: &'a [String],
        url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(Invocation {
                dir: out_dir.to_path_buf(),
                args: args.to_vec(),
                url: url.to_string(),
            });
            if url.contains("fail") {
                anyhow::bail!("simulated non-zero exit");
            }
            // honor the archive file the way yt-dlp does: a URL already
            // recorded there produces no new artifacts
            let archive = out_dir.join(ARCHIVE_FILE);
            let mut seen = tokio::fs::read_to_string(&archive).await.unwrap_or_default();
            if seen.lines().any(|l| l == url) {
                return Ok(());
            }
            if let Some(name) = Self::artifact_for(url) {
                tokio::fs::write(out_dir.join(name), b"media").await?;
            }
            seen.push_str(url);
            seen.push('\n');
            tokio::fs::write(&archive, seen).await?;
            Ok(())
        })
    }
}

#[tokio::test]
async fn full_pass_downloads_sequentially_and_organizes() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();
    let doc_path = base.join("subscriptions.txt");
    std::fs::write(&doc_path, DOC).unwrap();

    let downloader = Arc::new(FakeDownloader::new());
    run_pass(&doc_path, base, downloader.clone()).await.unwrap();

    // every URL was attempted, in document order, despite the failure
    let calls = downloader.calls.lock().unwrap().clone();
    let urls: Vec<_> = calls.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://x/1", "https://x/2", "https://t/fail", "https://t/1"]
    );

    // merged arguments: global first, then local
    assert_eq!(calls[0].args, vec!["-f", "best", "--no-progress"]);
    assert_eq!(calls[0].dir, base.join("music"));
    assert_eq!(calls[2].args, vec!["-f", "best"]);
    assert_eq!(calls[2].dir, base.join("talks"));

    // organized by first matching rule; the clip file matches `clips`
    // before `live` ever gets a look
    let music = base.join("music");
    assert!(music.join("clips/Funny CLIP compilation.mp4").is_file());
    assert!(music.join("live/Live at the venue.mkv").is_file());

    // archive file stays put, unmatched files stay put
    assert!(music.join(ARCHIVE_FILE).is_file());
    let talks = base.join("talks");
    assert!(talks.join("quiet talk.webm").is_file());
    assert!(talks.join(ARCHIVE_FILE).is_file());
}

#[tokio::test]
async fn second_pass_moves_nothing_more() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();
    let doc_path = base.join("subscriptions.txt");
    std::fs::write(&doc_path, DOC).unwrap();

    let downloader = Arc::new(FakeDownloader::new());
    run_pass(&doc_path, base, downloader.clone()).await.unwrap();
    run_pass(&doc_path, base, downloader.clone()).await.unwrap();

    // already-organized files were not duplicated or relocated again
    let music = base.join("music");
    assert!(music.join("clips/Funny CLIP compilation.mp4").is_file());
    assert!(!music.join("clips/clips").exists());
    assert!(music
        .join("clips")
        .read_dir()
        .unwrap()
        .all(|e| e.unwrap().file_name() == "Funny CLIP compilation.mp4"));
}

#[tokio::test]
async fn missing_document_fails_the_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let downloader = Arc::new(FakeDownloader::new());
    let err = run_pass(&tmp.path().join("nope.txt"), tmp.path(), downloader)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nope.txt"));
}
