//! Files downloaded artifacts into rule-matched subdirectories.

use anyhow::{Context, Result};
use std::path::Path;

use crate::downloader::ARCHIVE_FILE;
use crate::rules::RuleSet;

/// Extensions the organizer will consider moving: media plus the sidecar
/// files yt-dlp writes next to them.
const MEDIA_EXTENSIONS: &[&str] = &[
    // video
    "mkv", "mp4", "webm", "avi", "mov", "flv", "m4v", "ts",
    // audio
    "mp3", "m4a", "aac", "opus", "ogg", "oga", "flac", "wav",
    // thumbnails
    "jpg", "jpeg", "png", "webp", "gif",
    // metadata & subtitles
    "json", "description", "srt", "vtt", "ass", "lrc",
];

fn has_media_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| {
        lower.len() > ext.len() + 1
            && lower.ends_with(ext)
            && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
    })
}

/// Moves each matching file in `dir` into the subdirectory named by the first
/// rule whose pattern matches the filename (first match wins, at most one
/// move per file). Returns the number of files moved.
///
/// Left alone: subdirectories, the downloader's archive file, names outside
/// the media/sidecar extension list, and files matching no rule. A failed
/// move is logged and does not stop the scan.
pub async fn organize_dir(dir: &Path, rules: &RuleSet) -> Result<usize> {
    if rules.is_empty() {
        return Ok(0);
    }

    let mut moved = 0usize;
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("listing {}", dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name == ARCHIVE_FILE || !has_media_extension(name) {
            continue;
        }

        for (dest, rule) in rules.iter() {
            if !rule.is_match(name) {
                continue;
            }
            match move_into(dir, dest, name).await {
                Ok(()) => {
                    tracing::info!("moved {} to {}/", name, dest);
                    moved += 1;
                }
                Err(err) => tracing::warn!("could not move {}: {:#}", name, err),
            }
            break;
        }
    }

    Ok(moved)
}

async fn move_into(dir: &Path, dest: &str, name: &str) -> Result<()> {
    let dest_dir = dir.join(dest);
    tokio::fs::create_dir_all(&dest_dir)
        .await
        .with_context(|| format!("creating {}", dest_dir.display()))?;
    tokio::fs::rename(dir.join(name), dest_dir.join(name))
        .await
        .with_context(|| format!("renaming into {}", dest_dir.display()))?;
    Ok(())
}
