//! Configuration management for iTAP.
//!
//! Settings come from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `~/.config/itap/config.toml` (or the file given with `--config`)
//! 3. Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::files::filename::NamingStyle;

/// Smallest accepted pilot/block threshold.
pub const MIN_THRESHOLD: usize = 500;

/// Largest accepted pilot/block threshold.
pub const MAX_THRESHOLD: usize = 0xFFFF;

/// Highest supported verbosity level.
pub const MAX_VERBOSITY: u8 = 2;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Thresholds for pilot detection and block filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// A pilot tone must be longer than this many bytes to start a block.
    pub header_min_len: usize,
    /// Blocks shorter than this are merged into a neighbour.
    pub block_min_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            header_min_len: 7000,
            block_min_len: 14000,
        }
    }
}

impl ScanConfig {
    /// Creates a ScanConfig with both thresholds clamped to the valid range.
    pub fn new(header_min_len: usize, block_min_len: usize) -> Self {
        Self {
            header_min_len: clamp_threshold(header_min_len),
            block_min_len: clamp_threshold(block_min_len),
        }
    }

    pub fn clamped(&self) -> Self {
        Self::new(self.header_min_len, self.block_min_len)
    }
}

/// Output naming and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File naming style for split blocks (0-3).
    pub naming_style: NamingStyle,
    /// Diagnostic level (0-2). Has no effect on the produced files.
    pub verbosity: u8,
}

fn clamp_threshold(value: usize) -> usize {
    value.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("itap").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_optional(Self::config_path().as_deref())
    }

    /// Load `path` when given and present, defaults otherwise.
    fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML content. Missing sections and fields keep their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.scan = config.scan.clamped();
        config.output.verbosity = config.output.verbosity.min(MAX_VERBOSITY);
        Ok(config)
    }
}
