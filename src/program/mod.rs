//! CBM tape header decoding.
//!
//! A program on tape starts with a header block. After the countdown bytes
//! (`0x89` down to `0x81`) come the file type, the load and end addresses,
//! and a 16-byte PETSCII name:
//!
//! ```text
//! byte  0       0x89 marker
//! bytes 1..=8   countdown 0x88..0x81
//! byte  9       file type
//! bytes 10..=11 start address (LE)
//! bytes 12..=13 end address (LE)
//! bytes 14..    name, 16 bytes
//! ```

pub mod name;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::pulse::{ByteDecoder, PulseReader};
use crate::scan::Segment;
use crate::tap::TapFile;

pub use name::{ProgramName, FALLBACK_NAME, NAME_LEN};

/// First byte of a header block.
pub const HEADER_MARKER: u8 = 0x89;

/// Marker plus countdown, type and addresses.
const HEADER_FIELDS_LEN: usize = 14;

/// Fields decoded from a program's header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramHeader {
    pub file_type: u8,
    pub start_address: u16,
    pub end_address: u16,
    #[serde(skip)]
    pub name: ProgramName,
}

/// A segment together with what could be decoded from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramInfo {
    /// 1-based block number.
    pub number: usize,
    pub start: usize,
    pub end: usize,
    pub size: usize,
    pub name: ProgramName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ProgramHeader>,
}

impl ProgramInfo {
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Decode the header block at the start of `segment`.
///
/// Returns `None` when the segment ends before a header marker is decoded.
pub fn decode_header(tap: &TapFile, segment: &Segment) -> Option<ProgramHeader> {
    let data = tap.slice(segment.start, segment.end);
    let mut decoder = ByteDecoder::new(PulseReader::with_base(
        data,
        tap.version(),
        segment.start,
    ));

    loop {
        let byte = decoder.read_byte().value();
        if decoder.is_exhausted() {
            debug!(
                start = segment.start,
                end = segment.end,
                "premature end of segment, no header found"
            );
            return None;
        }
        if byte == HEADER_MARKER {
            break;
        }
    }

    let mut fields = [0u8; HEADER_FIELDS_LEN];
    fields[0] = HEADER_MARKER;
    for slot in fields[1..].iter_mut() {
        if decoder.is_exhausted() {
            break;
        }
        *slot = decoder.read_byte().value();
    }

    let mut raw_name = [0u8; NAME_LEN];
    for slot in raw_name.iter_mut() {
        if decoder.is_exhausted() {
            break;
        }
        *slot = decoder.read_byte().value();
    }

    Some(ProgramHeader {
        file_type: fields[9],
        start_address: u16::from_le_bytes([fields[10], fields[11]]),
        end_address: u16::from_le_bytes([fields[12], fields[13]]),
        name: ProgramName::from_raw(&raw_name),
    })
}

/// The sanitized program name of `segment`, or "NO-NAME".
pub fn decode_name(tap: &TapFile, segment: &Segment) -> ProgramName {
    decode_header(tap, segment)
        .map(|header| header.name)
        .unwrap_or_default()
}

/// Decode every segment's header, in parallel, keeping segment order.
pub fn describe(tap: &TapFile, segments: &[Segment]) -> Vec<ProgramInfo> {
    segments
        .par_iter()
        .enumerate()
        .map(|(i, segment)| {
            let header = decode_header(tap, segment);
            let name = header
                .as_ref()
                .map(|h| h.name.clone())
                .unwrap_or_default();
            ProgramInfo {
                number: i + 1,
                start: segment.start,
                end: segment.end,
                size: segment.len(),
                name,
                header,
            }
        })
        .collect()
}
