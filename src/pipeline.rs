//! Download orchestration: temp-file plumbing and the fetch + mux flow.

use crate::mime;
use anyhow::{Context, Result};
use mediagrab_fetch::{Downloader, ProgressFn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which half of a combined download a temp file holds. Only used for
/// naming.
#[derive(Debug, Clone, Copy)]
pub enum MediaRole {
    Video,
    Audio,
}

impl MediaRole {
    fn label(self) -> &'static str {
        match self {
            MediaRole::Video => "video",
            MediaRole::Audio => "audio",
        }
    }
}

/// Temp-file path for one half of a combined download, named
/// `<stem>-<role>.<ext>` with the extension inferred from the MIME type
/// (falling back to `tmp`).
fn temp_media_path(stem: &str, role: MediaRole, mime_type: Option<&str>) -> PathBuf {
    let extension = mime_type.and_then(mime::media_extension).unwrap_or("tmp");
    std::env::temp_dir().join(format!("{}-{}.{}", stem, role.label(), extension))
}

/// The extension the MIME type implies, when it differs from the output
/// path's own extension. `None` when they agree or the type is unknown.
fn mismatched_extension(output: &Path, mime_type: &str) -> Option<&'static str> {
    let expected = mime::media_extension(mime_type)?;
    let actual = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    (!actual.eq_ignore_ascii_case(expected)).then_some(expected)
}

fn log_progress() -> ProgressFn {
    Arc::new(|received, total| {
        if total > 0 {
            tracing::debug!(received, total, "download progress");
        } else {
            tracing::debug!(received, "download progress");
        }
    })
}

/// Download `url` straight into `output`.
///
/// When the caller knows the expected byte size or MIME type (e.g. from
/// resource metadata), a mismatch is logged as a warning but the file is
/// kept; the hints are cross-checks, not contracts.
pub async fn fetch_to_file(
    downloader: &Downloader,
    url: &str,
    output: &Path,
    expected_size: Option<u64>,
    mime_type: Option<&str>,
) -> Result<()> {
    if let Some(mime_type) = mime_type {
        if let Some(expected) = mismatched_extension(output, mime_type) {
            tracing::warn!(
                mime = mime_type,
                expected,
                "output extension does not match the MIME type: {}",
                output.display()
            );
        }
    }

    let payload = downloader
        .download(url, Some(log_progress()))
        .await
        .with_context(|| format!("downloading {url}"))?;

    if let Some(expected) = expected_size {
        if expected != payload.len() as u64 {
            tracing::warn!(
                expected,
                actual = payload.len(),
                "downloaded size does not match the expected size"
            );
        }
    }

    tokio::fs::write(output, &payload)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(bytes = payload.len(), "saved {}", output.display());
    Ok(())
}

/// Download `url` into the OS temp directory as `<stem>-<role>.<ext>`,
/// inferring the extension from the MIME type (falling back to `tmp`).
pub async fn download_to_temp(
    downloader: &Downloader,
    url: &str,
    stem: &str,
    role: MediaRole,
    mime_type: Option<&str>,
    expected_size: Option<u64>,
) -> Result<PathBuf> {
    let target = temp_media_path(stem, role, mime_type);
    fetch_to_file(downloader, url, &target, expected_size, mime_type).await?;
    Ok(target)
}

/// Download a video-only and an audio-only resource and combine them into
/// `output`. The temp inputs are removed once the mux succeeds.
pub async fn fetch_and_mux(
    downloader: &Downloader,
    video_url: &str,
    video_mime: Option<&str>,
    audio_url: &str,
    audio_mime: Option<&str>,
    stem: &str,
    output: &Path,
) -> Result<()> {
    let video =
        download_to_temp(downloader, video_url, stem, MediaRole::Video, video_mime, None).await?;
    let audio =
        download_to_temp(downloader, audio_url, stem, MediaRole::Audio, audio_mime, None).await?;

    // The packet copy is blocking by nature; keep it off the runtime.
    let (video_in, audio_in, target) = (video.clone(), audio.clone(), output.to_path_buf());
    tokio::task::spawn_blocking(move || mediagrab_av::mux(&video_in, &audio_in, &target))
        .await
        .context("mux task panicked")?
        .context("combining video and audio")?;

    tokio::fs::remove_file(&video).await.ok();
    tokio::fs::remove_file(&audio).await.ok();
    tracing::info!("mux complete: {}", output.display());
    Ok(())
}
