//! Output file naming for split blocks.
//!
//! Split blocks are named after the input tape, the block number, the program
//! name recovered from tape, or a combination, depending on [`NamingStyle`].
//! Companion outputs (`_cleaned.tap`, `.idx`) are placed next to the input.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::program::ProgramName;

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

/// Extension of split and cleaned outputs.
const TAP_EXTENSION: &str = "tap";

/// How split block files are named.
///
/// Numbers are 1-based and zero-padded to two digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NamingStyle {
    /// `<tape>_01.tap`
    #[default]
    Numbered,
    /// `<tape>_01_<NAME>.tap`
    NumberedWithName,
    /// `01_<NAME>.tap`
    NumberFirst,
    /// `<NAME>.tap`
    NameOnly,
}

impl TryFrom<u8> for NamingStyle {
    type Error = NamingStyleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NamingStyle::Numbered),
            1 => Ok(NamingStyle::NumberedWithName),
            2 => Ok(NamingStyle::NumberFirst),
            3 => Ok(NamingStyle::NameOnly),
            other => Err(NamingStyleError(other)),
        }
    }
}

impl From<NamingStyle> for u8 {
    fn from(style: NamingStyle) -> Self {
        match style {
            NamingStyle::Numbered => 0,
            NamingStyle::NumberedWithName => 1,
            NamingStyle::NumberFirst => 2,
            NamingStyle::NameOnly => 3,
        }
    }
}

/// A naming style number outside 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown naming style {0} (expected 0-3)")]
pub struct NamingStyleError(pub u8);

/// Errors that can occur during filename operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    /// Filename exceeds 255 character filesystem limit.
    #[error("Filename too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
}

/// Validates that a final filename doesn't exceed filesystem limits.
pub fn validate_length(filename: &str) -> Result<(), FilenameError> {
    if filename.len() > MAX_FILENAME_LENGTH {
        Err(FilenameError::TooLong {
            length: filename.len(),
            max: MAX_FILENAME_LENGTH,
        })
    } else {
        Ok(())
    }
}

/// Output path for block `number` (1-based) of `input`.
///
/// Styles that start with the block number or name drop the tape name but
/// keep the input's directory.
pub fn block_path(
    input: &Path,
    number: usize,
    name: &ProgramName,
    style: NamingStyle,
) -> Result<PathBuf, FilenameError> {
    let tape = tape_stem(input);
    let name = handle_reserved_name(name.as_str());

    let file_name = match style {
        NamingStyle::Numbered => format!("{}_{:02}", tape, number),
        NamingStyle::NumberedWithName => format!("{}_{:02}_{}", tape, number, name),
        NamingStyle::NumberFirst => format!("{:02}_{}", number, name),
        NamingStyle::NameOnly => name,
    };
    let file_name = format!("{}.{}", file_name, TAP_EXTENSION);
    validate_length(&file_name)?;

    Ok(input.with_file_name(file_name))
}

/// `<tape>_cleaned.tap` next to the input.
pub fn cleaned_path(input: &Path) -> PathBuf {
    with_suffix(input, "_cleaned.tap")
}

/// `<tape>.idx` next to the input.
pub fn index_path(input: &Path) -> PathBuf {
    with_suffix(input, ".idx")
}

/// Input file name without its extension.
fn tape_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replaces the input's extension with `suffix`.
fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut path: OsString = input.with_extension("").into_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

/// Checks if a name is a Windows reserved name and prefixes it if so.
///
/// Handles both exact matches (CON) and names with extensions (CON.txt).
fn handle_reserved_name(name: &str) -> String {
    let base_name = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    };

    let upper = base_name.trim_end().to_uppercase();
    if WINDOWS_RESERVED.contains(&upper.as_str()) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}
