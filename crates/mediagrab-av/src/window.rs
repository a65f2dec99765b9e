//! Time windows over a media timeline.

use crate::{Error, Result};

/// A time interval in seconds. An end of `0.0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub(crate) start: f64,
    pub(crate) end: f64,
}

impl TimeWindow {
    /// Whole-file window: no seek, no end bound, no retiming.
    pub const FULL: TimeWindow = TimeWindow {
        start: 0.0,
        end: 0.0,
    };

    /// Create a window, rejecting negative bounds and an end before the
    /// start.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start < 0.0 || end < 0.0 || (end != 0.0 && end < start) {
            return Err(Error::InvalidTimeRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// True when neither bound is set, i.e. a plain copy.
    pub fn is_full(&self) -> bool {
        self.start == 0.0 && self.end == 0.0
    }

    /// True when `seconds` lies past the end bound.
    pub fn is_past_end(&self, seconds: f64) -> bool {
        self.end != 0.0 && seconds > self.end
    }
}
