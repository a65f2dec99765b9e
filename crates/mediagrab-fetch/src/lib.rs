//! # mediagrab-fetch
//!
//! Parallel byte-range HTTP downloading.
//!
//! A [`Downloader`] probes a resource for range support, splits it into at
//! most 16 concurrent byte-range requests, aggregates per-part progress,
//! and reassembles the parts in index order into one contiguous payload.
//! Downloads are all-or-nothing and support cooperative cancellation.
//!
//! ## Example
//!
//! ```no_run
//! use mediagrab_fetch::Downloader;
//!
//! # async fn run() -> mediagrab_fetch::Result<()> {
//! let downloader = Downloader::new()?;
//! let payload = downloader.download("https://example.com/big.bin", None).await?;
//! println!("{} bytes", payload.len());
//! # Ok(())
//! # }
//! ```

mod coordinator;
mod error;
pub mod parts;
pub mod probe;

// Re-exports
pub use coordinator::{Downloader, ProgressFn, USER_AGENT};
pub use error::{Error, Result};
pub use parts::{plan_parts, DownloadPart, PartState, MAX_PARTS, MIN_PART_SIZE};
pub use probe::{probe, RangeSupport};
