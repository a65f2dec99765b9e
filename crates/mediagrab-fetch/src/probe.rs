//! Range-capability probe.

use crate::{Error, Result};
use reqwest::StatusCode;

/// What a probe learned about a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSupport {
    /// True when the server answered 206 to a full-range request and the
    /// total size is known. A resource of unknown size can never be
    /// range-split regardless of server capability, since the range math
    /// requires a size.
    pub supports_ranges: bool,
    /// Total size in bytes, when the server reported one.
    pub content_length: Option<u64>,
}

/// Issue a header-only request with `Range: bytes=0-` against `url`.
///
/// Accepts 200 (full content, not range capable) and 206 (partial content);
/// any other status or transport failure is surfaced without retry.
pub async fn probe(client: &reqwest::Client, url: &str) -> Result<RangeSupport> {
    let response = client
        .head(url)
        .header(reqwest::header::RANGE, "bytes=0-")
        .send()
        .await
        .map_err(|source| Error::Probe { source })?;

    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
        return Err(Error::unexpected_status(status.as_u16(), None));
    }

    let content_length = response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|len| *len > 0);

    let support = RangeSupport {
        supports_ranges: status == StatusCode::PARTIAL_CONTENT && content_length.is_some(),
        content_length,
    };
    tracing::debug!(
        supports_ranges = support.supports_ranges,
        content_length = ?support.content_length,
        url,
        "range probe complete"
    );
    Ok(support)
}
