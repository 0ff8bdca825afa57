//! Program boundary detection.
//!
//! Scanning runs in two steps over an in-memory TAP file:
//!
//! - [`pilot`] finds pilot tones longer than the header minimum
//! - [`boundary`] turns their start offsets into segments and folds away
//!   segments shorter than the block minimum
//!
//! The result only depends on the file bytes and the thresholds, so scanning
//! the same file twice yields the same segments.

pub mod boundary;
pub mod pilot;

use tracing::{debug, trace};

use crate::config::ScanConfig;
use crate::tap::{TapFile, HEADER_LEN};

pub use boundary::{build_segments, ensure_splittable, merge, Segment};
pub use pilot::{find_pilot_runs, PilotRun};

/// Locate every program in `tap`.
pub fn scan(tap: &TapFile, config: &ScanConfig) -> Vec<Segment> {
    let runs = find_pilot_runs(tap, config.header_min_len);
    debug!(
        pilot_runs = runs.len(),
        header_min_len = config.header_min_len,
        "pilot scan complete"
    );
    for run in &runs {
        trace!(start = run.start, end = run.end, "pilot tone");
    }

    let segments = build_segments(&runs, HEADER_LEN, tap.file_len(), config.block_min_len);
    debug!(
        segments = segments.len(),
        block_min_len = config.block_min_len,
        "segment boundaries built"
    );

    segments
}
