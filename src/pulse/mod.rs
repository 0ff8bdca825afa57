//! Pulse stream reading and classification.
//!
//! A TAP payload is a sequence of pulse lengths. Each non-zero byte is one
//! pulse; a zero byte introduces a long pulse whose encoding depends on the
//! container version. The cassette protocol distinguishes three pulse widths
//! (short, medium, long) which [`PulseClass`] recovers from the magnitude.

pub mod decoder;

use tracing::trace;

pub use decoder::{ByteDecoder, ByteRead};

/// Pulse length as stored in the container (clock cycles / 8).
pub type Pulse = u32;

/// Pulse length used for a zero byte in version 0 files.
const V0_OVERFLOW_PULSE: Pulse = 0x100;

/// Width category of a single pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseClass {
    /// 0x24..=0x36
    Short,
    /// 0x37..=0x49
    Medium,
    /// 0x4A..=0x64
    Long,
    /// Outside every data range
    None,
}

impl PulseClass {
    pub fn of(pulse: Pulse) -> Self {
        match pulse {
            0x24..=0x36 => PulseClass::Short,
            0x37..=0x49 => PulseClass::Medium,
            0x4A..=0x64 => PulseClass::Long,
            _ => PulseClass::None,
        }
    }

    pub fn is_short(self) -> bool {
        self == PulseClass::Short
    }

    pub fn is_medium(self) -> bool {
        self == PulseClass::Medium
    }

    pub fn is_long(self) -> bool {
        self == PulseClass::Long
    }

    pub fn is_medium_or_long(self) -> bool {
        matches!(self, PulseClass::Medium | PulseClass::Long)
    }
}

/// Whether a raw payload byte belongs to a pilot tone.
///
/// Operates on the byte as stored, before any extended-pulse decoding.
pub fn is_pilot(byte: u8) -> bool {
    byte > 40 && byte < 60
}

/// Reads pulse lengths from a TAP payload.
///
/// Offsets reported by [`PulseReader::position`] are relative to the slice the
/// reader was built on plus `base`, so callers can work in file offsets.
#[derive(Debug, Clone)]
pub struct PulseReader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
    extended: bool,
    exhausted: bool,
}

impl<'a> PulseReader<'a> {
    /// Create a reader over `data` for a container of the given version.
    pub fn new(data: &'a [u8], version: u8) -> Self {
        Self::with_base(data, version, 0)
    }

    /// Create a reader whose positions are offset by `base`.
    pub fn with_base(data: &'a [u8], version: u8, base: usize) -> Self {
        Self {
            data,
            pos: 0,
            base,
            extended: version >= 1,
            exhausted: false,
        }
    }

    /// Current read position (absolute when built with a base).
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// True once a read has hit the end of the data.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Read the next pulse, or `None` at end of stream.
    ///
    /// A zero byte without the three length bytes after it counts as end of
    /// stream and consumes the remainder.
    pub fn next_pulse(&mut self) -> Option<Pulse> {
        let Some(&byte) = self.data.get(self.pos) else {
            self.exhausted = true;
            return None;
        };
        let start = self.pos;
        self.pos += 1;

        if byte != 0 {
            return Some(Pulse::from(byte));
        }

        let pulse = if self.extended {
            let Some(raw) = self.data.get(self.pos..self.pos + 3) else {
                self.pos = self.data.len();
                self.exhausted = true;
                return None;
            };
            self.pos += 3;
            u32::from_le_bytes([raw[0], raw[1], raw[2], 0]) >> 3
        } else {
            V0_OVERFLOW_PULSE
        };

        if pulse > 0xFF {
            trace!(offset = self.base + start, pulse, "high pulse");
        }

        Some(pulse)
    }
}

impl Iterator for PulseReader<'_> {
    type Item = Pulse;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pulse()
    }
}
