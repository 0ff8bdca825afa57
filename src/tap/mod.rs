//! TAP container format parser and writer
//!
//! Reference: https://vice-emu.sourceforge.io/vice_17.html#SEC330
//!
//! A TAP file is a 20-byte header followed by the raw pulse stream:
//!
//! ```text
//! offset 0x00  12 bytes   signature, ASCII "C64-TAPE-RAW"
//! offset 0x0C   1 byte    version (0, 1, or 2)
//! offset 0x0D   3 bytes   reserved, zero on write
//! offset 0x10   4 bytes   payload length, little-endian
//! offset 0x14   N bytes   pulse-length bytes
//! ```
//!
//! All offsets handed out by this crate (segments, pilot runs, index entries)
//! are absolute file offsets, so the first payload byte sits at [`HEADER_LEN`].

use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// Magic bytes at the start of every TAP file.
pub const SIGNATURE: &[u8; 12] = b"C64-TAPE-RAW";

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 20;

/// Offset of the little-endian payload length field.
const LENGTH_FIELD_OFFSET: u64 = 16;

/// Fixed-layout TAP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapHeader {
    /// Format version. Versions >= 1 store long pulses as 24-bit values.
    pub version: u8,
    /// Number of payload bytes following the header.
    pub data_length: u32,
}

impl TapHeader {
    pub fn new(version: u8, data_length: u32) -> Self {
        Self {
            version,
            data_length,
        }
    }

    /// Build a header whose length field matches `payload_len`.
    pub fn for_payload(version: u8, payload_len: usize) -> Result<Self> {
        let data_length =
            u32::try_from(payload_len).map_err(|_| Error::PayloadTooLarge { len: payload_len })?;
        Ok(Self::new(version, data_length))
    }

    /// Parse the header from the first 20 bytes of `bytes`.
    ///
    /// The reserved bytes are ignored on read.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::TruncatedHeader { len: bytes.len() });
        }
        if &bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(Error::InvalidSignature);
        }

        let version = bytes[12];
        let data_length = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);

        Ok(Self {
            version,
            data_length,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..SIGNATURE.len()].copy_from_slice(SIGNATURE);
        out[12] = self.version;
        // 13..16 reserved, left zero
        out[16..20].copy_from_slice(&self.data_length.to_le_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

/// A header length field that disagreed with the measured payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    /// Value stored in the file header.
    pub reported: u32,
    /// Payload bytes actually present.
    pub actual: u32,
}

/// A TAP file held in memory.
///
/// The header always reflects the measured payload size; a disagreeing
/// length field is recorded in [`TapFile::length_mismatch`].
#[derive(Debug, Clone)]
pub struct TapFile {
    header: TapHeader,
    bytes: Vec<u8>,
    mismatch: Option<LengthMismatch>,
}

impl TapFile {
    /// Read and validate a TAP file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Validate raw file contents.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut header = TapHeader::parse(&bytes)?;
        let measured = TapHeader::for_payload(header.version, bytes.len() - HEADER_LEN)?;

        let mismatch = if header.data_length != measured.data_length {
            warn!(
                reported = header.data_length,
                actual = measured.data_length,
                "TAP header reports wrong payload size"
            );
            let mismatch = LengthMismatch {
                reported: header.data_length,
                actual: measured.data_length,
            };
            header.data_length = measured.data_length;
            Some(mismatch)
        } else {
            None
        };

        Ok(Self {
            header,
            bytes,
            mismatch,
        })
    }

    /// Build a well-formed TAP file around a payload.
    pub fn from_payload(version: u8, payload: &[u8]) -> Result<Self> {
        let header = TapHeader::for_payload(version, payload.len())?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&header.to_bytes());
        bytes.extend_from_slice(payload);
        Ok(Self {
            header,
            bytes,
            mismatch: None,
        })
    }

    pub fn header(&self) -> &TapHeader {
        &self.header
    }

    pub fn version(&self) -> u8 {
        self.header.version
    }

    /// The disagreeing length field found on read, if any.
    pub fn length_mismatch(&self) -> Option<LengthMismatch> {
        self.mismatch
    }

    /// Pulse stream following the header.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Total file length; the end offset of the last segment.
    pub fn file_len(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes in the absolute range `start..end`, clamped to the file.
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.bytes.len());
        let start = start.min(end);
        &self.bytes[start..end]
    }

    /// Write the file with a header matching its payload.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.header.write_to(writer)?;
        writer.write_all(self.payload())
    }
}

/// Rewrite the header length field of the file at `path` to its true size.
///
/// Returns the corrected value. Only the four length bytes are touched.
pub fn repair_length_field<P: AsRef<Path>>(path: P) -> Result<u32> {
    let path = path.as_ref();
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let file_len = file.metadata()?.len() as usize;
    if file_len < HEADER_LEN {
        return Err(Error::TruncatedHeader { len: file_len });
    }

    let actual = TapHeader::for_payload(0, file_len - HEADER_LEN)?.data_length;
    file.seek(SeekFrom::Start(LENGTH_FIELD_OFFSET))?;
    file.write_all(&actual.to_le_bytes())?;
    file.flush()?;

    Ok(actual)
}
