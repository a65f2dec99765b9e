//! Part planning for ranged downloads.
//!
//! Pure range math: splitting `[0, content_length)` into at most
//! [`MAX_PARTS`] inclusive byte ranges that partition the resource exactly.

/// Maximum number of parts a download can be split into.
pub const MAX_PARTS: u64 = 16;

/// Minimum size (in bytes) worth giving its own part. Small resources are
/// fetched with fewer parts rather than many tiny requests.
pub const MIN_PART_SIZE: u64 = 1024 * 1024;

/// Completion state of one download part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartState {
    #[default]
    Pending,
    InFlight,
    Done,
    Failed,
}

/// One slice of the resource, owned by the coordinator for the job's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPart {
    pub index: usize,
    /// Byte range, inclusive on both ends. `None` when the whole resource
    /// is fetched in a single unranged request.
    pub range: Option<(u64, u64)>,
    /// Bytes received so far, updated as the part completes.
    pub received: u64,
    pub state: PartState,
}

impl DownloadPart {
    fn new(index: usize, range: Option<(u64, u64)>) -> Self {
        Self {
            index,
            range,
            received: 0,
            state: PartState::Pending,
        }
    }

    /// `Range` header value for this part, when ranged.
    pub fn range_header(&self) -> Option<String> {
        self.range.map(|(start, end)| format!("bytes={start}-{end}"))
    }

    /// Expected payload size, when known.
    pub fn expected_len(&self) -> Option<u64> {
        self.range.map(|(start, end)| end - start + 1)
    }
}

/// Split a resource into ranged parts.
///
/// Falls back to a single unranged part when the server cannot serve ranges
/// or the size is unknown (range math needs a size). Otherwise the part
/// count is `min(MAX_PARTS, ceil(len / MIN_PART_SIZE))` and the ranges
/// cover `[0, len)` with no gap and no overlap; the last part absorbs the
/// remainder of the integer division.
pub fn plan_parts(content_length: Option<u64>, ranged: bool) -> Vec<DownloadPart> {
    let len = match content_length {
        Some(len) if ranged && len > 0 => len,
        _ => return vec![DownloadPart::new(0, None)],
    };

    let count = len.div_ceil(MIN_PART_SIZE).clamp(1, MAX_PARTS);
    let part_size = len.div_ceil(count);

    (0..count)
        .map(|i| {
            let start = i * part_size;
            let end = ((i + 1) * part_size - 1).min(len - 1);
            DownloadPart::new(i as usize, Some((start, end)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_partition(len: u64) {
        let parts = plan_parts(Some(len), true);
        assert!(!parts.is_empty());
        assert!(parts.len() as u64 <= MAX_PARTS);

        let mut expected_start = 0u64;
        let mut covered = 0u64;
        for (i, part) in parts.iter().enumerate() {
            assert_eq!(part.index, i);
            let (start, end) = part.range.expect("ranged plan");
            assert_eq!(start, expected_start, "gap or overlap at part {i}");
            assert!(end >= start);
            covered += end - start + 1;
            expected_start = end + 1;
        }
        assert_eq!(expected_start, len, "ranges must end at content length");
        assert_eq!(covered, len, "part lengths must sum to content length");
    }

    #[test]
    fn partitions_exactly_for_various_lengths() {
        for len in [
            1,
            MIN_PART_SIZE - 1,
            MIN_PART_SIZE,
            MIN_PART_SIZE + 1,
            3 * MIN_PART_SIZE,
            10 * MIN_PART_SIZE + 123,
            MAX_PARTS * MIN_PART_SIZE + 1,
            100 * 1024 * 1024 * 1024,
        ] {
            assert_exact_partition(len);
        }
    }

    #[test]
    fn part_count_is_bounded() {
        assert_eq!(plan_parts(Some(1), true).len(), 1);
        assert_eq!(plan_parts(Some(MIN_PART_SIZE), true).len(), 1);
        assert_eq!(plan_parts(Some(3 * MIN_PART_SIZE), true).len(), 3);
        // Arbitrarily large resources still cap at MAX_PARTS.
        assert_eq!(
            plan_parts(Some(1024 * 1024 * 1024 * 1024), true).len() as u64,
            MAX_PARTS
        );
    }

    #[test]
    fn unranged_or_unknown_size_is_a_single_part() {
        for plan in [
            plan_parts(Some(10 * MIN_PART_SIZE), false),
            plan_parts(None, true),
            plan_parts(Some(0), true),
        ] {
            assert_eq!(plan.len(), 1);
            assert_eq!(plan[0].range, None);
            assert_eq!(plan[0].range_header(), None);
        }
    }

    #[test]
    fn range_header_is_inclusive() {
        let parts = plan_parts(Some(2 * MIN_PART_SIZE), true);
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0].range_header().as_deref(),
            Some("bytes=0-1048575")
        );
        assert_eq!(
            parts[1].range_header().as_deref(),
            Some("bytes=1048576-2097151")
        );
        assert_eq!(parts[1].expected_len(), Some(MIN_PART_SIZE));
    }
}
