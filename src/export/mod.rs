//! Output generation: split blocks, the cleaned tape and the index file.
//!
//! Every TAP produced here gets a fresh header whose length field is computed
//! after trimming, and keeps the version byte of the source tape.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::program::ProgramName;
use crate::scan::Segment;
use crate::tap::{TapFile, TapHeader, HEADER_LEN};
use crate::trim;

/// First line of every index file.
pub const INDEX_HEADER: &str = "; Index file generated by Split Tap";

/// A complete TAP file holding one trimmed segment.
pub fn emit_segment(tap: &TapFile, segment: &Segment) -> Result<Vec<u8>> {
    let data = trim::trim(tap.slice(segment.start, segment.end));
    let header = TapHeader::for_payload(tap.version(), data.len())?;

    let mut out = Vec::with_capacity(HEADER_LEN + data.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(data);
    Ok(out)
}

/// All segments trimmed and joined into one tape.
#[derive(Debug, Clone)]
pub struct CleanedTap {
    /// Complete TAP file contents.
    pub bytes: Vec<u8>,
    /// Payload size of the source tape.
    pub original_len: usize,
    /// Trimmed size of each block, in order.
    pub block_lens: Vec<usize>,
}

impl CleanedTap {
    /// Payload size of the cleaned tape.
    pub fn cleaned_len(&self) -> usize {
        self.bytes.len() - HEADER_LEN
    }

    /// Bytes removed from the source payload.
    pub fn reduction(&self) -> usize {
        self.original_len.saturating_sub(self.cleaned_len())
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        100.0 * self.reduction() as f64 / self.original_len as f64
    }
}

/// Build a single tape from every segment, each with its tail trimmed.
///
/// Bytes between segments (anything before the first one) are dropped.
pub fn emit_cleaned(tap: &TapFile, segments: &[Segment]) -> Result<CleanedTap> {
    let blocks: Vec<&[u8]> = segments
        .iter()
        .map(|segment| trim::trim(tap.slice(segment.start, segment.end)))
        .collect();
    let block_lens: Vec<usize> = blocks.iter().map(|block| block.len()).collect();
    let total: usize = block_lens.iter().sum();

    let header = TapHeader::for_payload(tap.version(), total)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + total);
    bytes.extend_from_slice(&header.to_bytes());
    for block in blocks {
        bytes.extend_from_slice(block);
    }

    Ok(CleanedTap {
        bytes,
        original_len: tap.payload().len(),
        block_lens,
    })
}

/// Text index with one `0x<offset> <name>` line per segment.
///
/// Segments without a matching name get "NO-NAME".
pub fn emit_index(segments: &[Segment], names: &[ProgramName]) -> String {
    let mut out = String::new();
    out.push_str(INDEX_HEADER);
    out.push('\n');

    for (i, segment) in segments.iter().enumerate() {
        let name = names.get(i).cloned().unwrap_or_default();
        // writing to a String cannot fail
        let _ = writeln!(out, "0x{:08X} {}", segment.start, name.padded());
    }

    out
}

/// Write an output file, reporting the path on failure.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
