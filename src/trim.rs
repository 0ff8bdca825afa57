//! Trailing noise removal.
//!
//! Captures usually keep recording after a program's last block, leaving a
//! tail of short noise pulses. The end of real data is marked by a long
//! pause, stored as a zero byte plus three length bytes, so a segment is cut
//! right after the last such pause.

use crate::pulse::PulseClass;

/// How far back from the end the trimmer looks for a pause.
pub const TRIM_WINDOW: usize = 0x4000;

/// Bytes kept after the pause marker (the zero and its 24-bit length).
const PAUSE_LEN: usize = 4;

/// Length `data` should be cut to.
///
/// Scans backward from `len - 4`, over at most [`TRIM_WINDOW`] bytes, for a
/// zero byte and keeps it plus its three length bytes. Segments whose byte at
/// `len - 4` is already a zero, or with no zero inside the window, keep their
/// full length.
pub fn trimmed_len(data: &[u8]) -> usize {
    let len = data.len();
    if len < PAUSE_LEN {
        return len;
    }

    let last = len - PAUSE_LEN;
    if data[last] == 0 {
        return len;
    }

    let lowest = (len + 1).saturating_sub(TRIM_WINDOW);
    for i in (lowest..=last).rev() {
        if PulseClass::of(u32::from(data[i])).is_short() {
            continue;
        }
        if data[i] == 0 {
            return i + PAUSE_LEN;
        }
    }

    len
}

/// `data` without its trailing noise.
pub fn trim(data: &[u8]) -> &[u8] {
    &data[..trimmed_len(data)]
}
