//! Pilot tone detection.
//!
//! Every block on tape is preceded by a long leader of identical pulses. The
//! scanner walks the raw payload once and records each leader longer than the
//! configured minimum; those are where programs begin.

use serde::Serialize;

use crate::pulse::is_pilot;
use crate::tap::{TapFile, HEADER_LEN};

/// Inclusive byte range of a pilot tone, in file offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PilotRun {
    pub start: usize,
    pub end: usize,
}

impl PilotRun {
    /// Number of pilot bytes in the run.
    pub fn pulse_count(&self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Idle,
    InPilot { start: usize, count: usize },
}

/// Find every pilot run in the payload of `tap` longer than `min_len` bytes.
pub fn find_pilot_runs(tap: &TapFile, min_len: usize) -> Vec<PilotRun> {
    scan_bytes(tap.payload(), HEADER_LEN, min_len)
}

/// Single pass over raw bytes; `base` is the file offset of `data[0]`.
///
/// A run still open when the data ends is dropped, since no closing
/// non-pilot byte was seen.
pub fn scan_bytes(data: &[u8], base: usize, min_len: usize) -> Vec<PilotRun> {
    let mut runs = Vec::new();
    let mut state = ScanState::Idle;

    for (i, &byte) in data.iter().enumerate() {
        let offset = base + i;
        state = match (state, is_pilot(byte)) {
            (ScanState::Idle, true) => ScanState::InPilot {
                start: offset,
                count: 1,
            },
            (ScanState::InPilot { start, count }, true) => ScanState::InPilot {
                start,
                count: count + 1,
            },
            (ScanState::InPilot { start, count }, false) => {
                if count > min_len {
                    runs.push(PilotRun {
                        start,
                        end: offset - 1,
                    });
                }
                ScanState::Idle
            }
            (ScanState::Idle, false) => ScanState::Idle,
        };
    }

    runs
}
