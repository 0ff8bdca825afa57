//! Segment boundaries from pilot runs.

use serde::Serialize;

use super::pilot::PilotRun;
use crate::error::{Error, Result};

/// Half-open byte range `start..end` of one program, in file offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Offset of the last byte in the segment.
    pub fn last_offset(&self) -> usize {
        self.end.saturating_sub(1)
    }
}

/// Turn pilot runs into program segments.
///
/// Boundaries are `data_start`, the start of every run, and `data_end`.
/// Segments shorter than `block_min_len` are folded into a neighbour: into
/// the following segment, or the preceding one when they are last.
///
/// Folding stops at one segment. A tape whose whole payload is shorter than
/// `block_min_len` still yields that single undersized segment, so its data
/// can be listed and cleaned.
pub fn build_segments(
    runs: &[PilotRun],
    data_start: usize,
    data_end: usize,
    block_min_len: usize,
) -> Vec<Segment> {
    let mut bounds = Vec::with_capacity(runs.len() + 2);
    bounds.push(data_start);
    bounds.extend(runs.iter().map(|run| run.start));
    bounds.push(data_end);

    drop_undersized(&mut bounds, block_min_len.max(1));

    bounds
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn drop_undersized(bounds: &mut Vec<usize>, min_len: usize) {
    let mut i = 0;
    // stop once a single segment is left
    while i + 1 < bounds.len() && bounds.len() > 2 {
        if bounds[i + 1] - bounds[i] >= min_len {
            i += 1;
            continue;
        }
        if i + 2 < bounds.len() {
            bounds.remove(i + 1);
        } else {
            bounds.remove(i);
        }
    }
}

/// Join segment `index` with the one after it.
pub fn merge(mut segments: Vec<Segment>, index: usize) -> Result<Vec<Segment>> {
    if index >= segments.len().saturating_sub(1) {
        return Err(Error::SegmentOutOfRange {
            index,
            count: segments.len(),
        });
    }
    let next = segments.remove(index + 1);
    segments[index].end = next.end;
    Ok(segments)
}

/// Fail unless there are at least two segments to split apart.
pub fn ensure_splittable(segments: &[Segment]) -> Result<()> {
    if segments.len() < 2 {
        return Err(Error::InsufficientSegments {
            found: segments.len(),
        });
    }
    Ok(())
}
