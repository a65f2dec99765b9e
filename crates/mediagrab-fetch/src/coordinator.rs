//! Parallel ranged-download coordinator.
//!
//! Splits one resource fetch into concurrent byte-range requests, tracks
//! per-part progress, and reassembles the parts in index order into one
//! contiguous byte sequence. Success is all-or-nothing: the first part
//! failure aborts the whole download.

use crate::parts::{plan_parts, DownloadPart, PartState};
use crate::probe::probe;
use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// User-Agent sent on every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.67 Safari/537.36";

/// Aggregate progress callback: (bytes received across all parts, total
/// bytes or 0 when unknown). Invoked from the transport path, so it must
/// return quickly and never block.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Coordinates one download at a time over a shared HTTP client.
///
/// Holds no file handles; the assembled bytes are owned solely by the
/// caller once returned.
pub struct Downloader {
    client: reqwest::Client,
    canceled: Arc<AtomicBool>,
    cancel_notify: Arc<Notify>,
    active: Arc<AtomicBool>,
}

impl Downloader {
    /// Create a downloader with the fixed User-Agent applied to every
    /// request.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            canceled: Arc::new(AtomicBool::new(false)),
            cancel_notify: Arc::new(Notify::new()),
            active: Arc::new(AtomicBool::new(false)),
        })
    }

    /// True while a download is in flight. Pairs with [`Downloader::cancel`]
    /// for a toggle-to-cancel control.
    pub fn is_downloading(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Request cooperative cancellation of the active download.
    ///
    /// In-flight part requests are not aborted; the wait loop stops waiting
    /// on them and discards whatever they eventually produce.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
        self.cancel_notify.notify_waiters();
    }

    /// Download `url`, splitting into concurrent ranged parts when the
    /// server supports it, and return the reassembled payload.
    pub async fn download(&self, url: &str, progress: Option<ProgressFn>) -> Result<Bytes> {
        self.canceled.store(false, Ordering::Relaxed);
        self.active.store(true, Ordering::Relaxed);
        let result = self.download_inner(url, progress).await;
        self.active.store(false, Ordering::Relaxed);
        result
    }

    async fn download_inner(&self, url: &str, progress: Option<ProgressFn>) -> Result<Bytes> {
        let support = probe(&self.client, url).await?;
        if self.canceled.load(Ordering::Relaxed) {
            return Err(Error::Canceled);
        }
        let total_len = support.content_length.unwrap_or(0);

        let mut parts = plan_parts(support.content_length, support.supports_ranges);
        tracing::info!(url, parts = parts.len(), total = total_len, "starting download");

        // One counter per part; the aggregate reported to the callback is
        // the sum over all of them.
        let counters: Arc<Vec<AtomicU64>> =
            Arc::new(parts.iter().map(|_| AtomicU64::new(0)).collect());

        let mut in_flight = FuturesUnordered::new();
        for part in &mut parts {
            part.state = PartState::InFlight;
            let fetch = fetch_part(
                self.client.clone(),
                url.to_string(),
                part.index,
                part.range_header(),
                part.expected_len(),
                counters.clone(),
                progress.clone(),
                total_len,
            );
            let index = part.index;
            in_flight.push(async move { (index, fetch.await) });
        }

        let mut payloads: Vec<Option<Bytes>> = vec![None; parts.len()];
        let mut remaining = parts.len();
        while remaining > 0 {
            // Register the cancel waiter before re-reading the flag;
            // notify_waiters stores no permit, so a cancel landing between an
            // unregistered gap and the next await would otherwise be lost.
            let canceled = self.cancel_notify.notified();
            tokio::pin!(canceled);
            canceled.as_mut().enable();
            if self.canceled.load(Ordering::Relaxed) {
                return Err(Error::Canceled);
            }
            tokio::select! {
                Some((index, settled)) = in_flight.next() => {
                    match settled {
                        Ok(payload) => {
                            parts[index].received = payload.len() as u64;
                            parts[index].state = PartState::Done;
                            payloads[index] = Some(payload);
                            remaining -= 1;
                        }
                        Err(error) => {
                            parts[index].state = PartState::Failed;
                            // Fail fast: sibling parts are dropped unawaited.
                            return Err(error);
                        }
                    }
                }
                _ = canceled.as_mut() => return Err(Error::Canceled),
            }
        }

        // Join strictly by part index, never by completion order.
        let mut joined = BytesMut::with_capacity(total_len as usize);
        for payload in payloads.into_iter().flatten() {
            joined.extend_from_slice(&payload);
        }
        tracing::info!(url, bytes = joined.len(), "download complete");
        Ok(joined.freeze())
    }
}

#[allow(clippy::too_many_arguments)]
async fn fetch_part(
    client: reqwest::Client,
    url: String,
    index: usize,
    range_header: Option<String>,
    expected_len: Option<u64>,
    counters: Arc<Vec<AtomicU64>>,
    progress: Option<ProgressFn>,
    total_len: u64,
) -> Result<Bytes> {
    let mut request = client.get(&url);
    if let Some(header) = range_header {
        request = request.header(reqwest::header::RANGE, header);
    }
    let response = request
        .send()
        .await
        .map_err(|source| Error::transport(Some(index), source))?;

    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
        return Err(Error::unexpected_status(status.as_u16(), Some(index)));
    }

    let mut payload = BytesMut::with_capacity(expected_len.unwrap_or(0) as usize);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| Error::transport(Some(index), source))?;
        payload.extend_from_slice(&chunk);

        counters[index].store(payload.len() as u64, Ordering::Relaxed);
        if let Some(callback) = &progress {
            let aggregate: u64 = counters
                .iter()
                .map(|counter| counter.load(Ordering::Relaxed))
                .sum();
            callback(aggregate, total_len);
        }
    }

    tracing::debug!(part = index, bytes = payload.len(), "part complete");
    Ok(payload.freeze())
}
