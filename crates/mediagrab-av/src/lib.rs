//! # mediagrab-av
//!
//! Lossless container operations over native FFmpeg bindings.
//!
//! This crate copies compressed media packets between containers without
//! decoding or re-encoding them:
//! - [`remux`] - convert a file to another container format
//! - [`clip`] - extract a time window into a standalone file
//! - [`mux`] - combine a video-only and an audio-only file
//! - [`split_into_clips`] - tile a file into consecutive clips
//!
//! ## Example
//!
//! ```no_run
//! use mediagrab_av::{clip, TimeWindow};
//!
//! let window = TimeWindow::new(10.0, 40.0)?;
//! clip("in.mp4".as_ref(), "out.mkv".as_ref(), window)?;
//! # Ok::<(), mediagrab_av::Error>(())
//! ```

mod copy;
mod error;
mod planner;
mod window;

// Re-exports
pub use copy::{clip, mux, remux};
pub use error::{Error, Result};
pub use planner::{plan_clips, split_into_clips};
pub use window::TimeWindow;
