//! Cassette byte decoder.
//!
//! Each byte on tape is announced by a sync mark (a long pulse followed by a
//! medium one), carries eight data bits as pulse pairs, least significant bit
//! first, and ends with a parity pair:
//!
//! - short then medium/long encodes `0`
//! - medium/long then short encodes `1`

use tracing::debug;

use super::{PulseClass, PulseReader};

/// Outcome of decoding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRead {
    /// A complete byte, parity pair consumed.
    Byte(u8),
    /// The stream ended after sync; holds the bits gathered so far.
    Truncated(u8),
    /// The stream ended before a sync mark was seen.
    NoSync,
}

impl ByteRead {
    /// The decoded value; zero when no sync was found.
    pub fn value(self) -> u8 {
        match self {
            ByteRead::Byte(b) | ByteRead::Truncated(b) => b,
            ByteRead::NoSync => 0,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, ByteRead::Byte(_))
    }
}

/// Decodes bytes from a pulse stream, one sync mark at a time.
#[derive(Debug, Clone)]
pub struct ByteDecoder<'a> {
    pulses: PulseReader<'a>,
}

impl<'a> ByteDecoder<'a> {
    pub fn new(pulses: PulseReader<'a>) -> Self {
        Self { pulses }
    }

    /// True once the underlying stream has run out.
    pub fn is_exhausted(&self) -> bool {
        self.pulses.is_exhausted()
    }

    /// Decode the next byte.
    ///
    /// Always consumes pulses, so repeated calls make progress even when
    /// nothing decodes.
    pub fn read_byte(&mut self) -> ByteRead {
        if !self.find_sync() {
            debug!(offset = self.pulses.position(), "sync not found");
            return ByteRead::NoSync;
        }

        let mut byte = 0u8;
        let mut bit = 0u8;
        for _ in 0..8 {
            let Some((first, second)) = self.next_pair() else {
                return ByteRead::Truncated(byte);
            };

            if first.is_short() && second.is_medium_or_long() {
                bit = 0;
            } else if first.is_medium_or_long() && second.is_short() {
                bit = 0x80;
            }
            // Any other pairing repeats the previous bit.

            byte = (byte >> 1) | bit;
        }

        // parity / stop pair
        if self.next_pair().is_none() {
            return ByteRead::Truncated(byte);
        }

        ByteRead::Byte(byte)
    }

    /// Slide over the stream until a long pulse is followed by a medium one.
    fn find_sync(&mut self) -> bool {
        let Some(mut prev) = self.pulses.next_pulse() else {
            return false;
        };
        while let Some(pulse) = self.pulses.next_pulse() {
            if PulseClass::of(prev).is_long() && PulseClass::of(pulse).is_medium() {
                return true;
            }
            prev = pulse;
        }
        false
    }

    fn next_pair(&mut self) -> Option<(PulseClass, PulseClass)> {
        let first = self.pulses.next_pulse()?;
        let second = self.pulses.next_pulse()?;
        Some((PulseClass::of(first), PulseClass::of(second)))
    }
}
