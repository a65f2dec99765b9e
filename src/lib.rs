//! # mediagrab
//!
//! Orchestration layer tying [`mediagrab_fetch`] (parallel ranged
//! downloads) to [`mediagrab_av`] (lossless container operations): temp
//! file naming from MIME types, download-to-file plumbing, and the
//! download-both-then-mux flow.

pub mod mime;
pub mod pipeline;
