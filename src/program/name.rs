//! Program name sanitization.
//!
//! Names on tape are 16 PETSCII bytes. They are turned into a printable,
//! filesystem-safe ASCII label so they can be shown in listings and used in
//! output file names.

use std::fmt;

use serde::Serialize;

/// Maximum number of name bytes stored in a tape header.
pub const NAME_LEN: usize = 16;

/// Name used when nothing printable is left after sanitization.
pub const FALLBACK_NAME: &str = "NO-NAME";

/// Characters that are invalid in filenames and become `_`.
const INVALID_CHARS: &[u8] = b"*<>?:|^";

/// Path separators and commas, which become `.`.
const SEPARATOR_CHARS: &[u8] = b",\\/";

/// A sanitized program name of at most 16 ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProgramName(String);

impl ProgramName {
    /// Build a name from the raw header bytes.
    ///
    /// Applies the following transformations in order:
    /// 1. Stop at the first NUL byte (and after 16 bytes)
    /// 2. Control bytes → `_`, shifted PETSCII (0xA0-0xFE) → lower half
    /// 3. Trailing spaces trimmed
    /// 4. Filesystem-hostile characters replaced
    /// 5. Empty, all-space or all-underscore results → "NO-NAME"
    pub fn from_raw(raw: &[u8]) -> Self {
        let mut bytes: Vec<u8> = raw
            .iter()
            .take(NAME_LEN)
            .take_while(|&&b| b != 0)
            .map(|&b| unshift_petscii(b))
            .collect();

        while bytes.last() == Some(&b' ') {
            bytes.pop();
        }

        let name: String = bytes.into_iter().map(filesystem_safe).collect();

        if name.chars().all(|c| c == ' ' || c == '_') {
            Self::default()
        } else {
            Self(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether sanitization fell back to "NO-NAME".
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_NAME
    }

    /// Name padded or truncated to exactly 16 columns.
    pub fn padded(&self) -> String {
        format!("{:<width$.width$}", self.0, width = NAME_LEN)
    }
}

impl Default for ProgramName {
    fn default() -> Self {
        Self(FALLBACK_NAME.to_string())
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProgramName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn unshift_petscii(b: u8) -> u8 {
    match b {
        0x01..=0x1F => b'_',
        0xA0..=0xFE => b & 0x7F,
        _ => b,
    }
}

fn filesystem_safe(b: u8) -> char {
    match b {
        _ if INVALID_CHARS.contains(&b) => '_',
        _ if SEPARATOR_CHARS.contains(&b) => '.',
        b'"' => '\'',
        0x80..=0xFF => '_',
        _ => char::from(b),
    }
}
