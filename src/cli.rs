//! Command-line interface definition.
//!
//! Lives in the library so the man page generator in `xtask` can render it.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::config::MAX_VERBOSITY;
use crate::files::filename::NamingStyle;

#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("ITAP_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("ITAP_BUILD_DATE"),
    ")"
);

const AFTER_HELP: &str = "\
Naming styles (-n):
  0  <tape>_01.tap           (default when -n is omitted)
  1  <tape>_01_<name>.tap    (same as a bare -n)
  2  01_<name>.tap
  3  <name>.tap

Debug levels (-d):
  0  warnings only
  1  header and sync messages (same as a bare -d)
  2  everything, including pulse traces

RUST_LOG overrides the debug level when set.";

#[derive(Parser, Debug)]
#[command(name = "itap")]
#[command(author, version = VERSION)]
#[command(about = "Split a Commodore TAP tape image into one file per program")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// TAP file to split
    #[arg(required_unless_present = "completions", value_name = "TAP")]
    pub input: Option<PathBuf>,

    /// Batch mode, never ask any question
    #[arg(short, long)]
    pub batch: bool,

    /// List blocks and exit
    #[arg(short, long)]
    pub list: bool,

    /// Write an index file (.idx) with block offsets and names
    #[arg(short, long)]
    pub index: bool,

    /// Write a single cleaned TAP file and exit
    #[arg(short, long)]
    pub clean: bool,

    /// Output filename style, 0 to 3 (`-n2` or `--names=2`)
    #[arg(
        short,
        long,
        value_name = "STYLE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1",
        value_parser = parse_naming_style,
    )]
    pub names: Option<NamingStyle>,

    /// Diagnostic verbosity, 0 to 2 (`-d2` or `--debug=2`)
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1",
        value_parser = clap::value_parser!(u8).range(0..=MAX_VERBOSITY as i64),
    )]
    pub debug: Option<u8>,

    /// Minimum pilot tone length in bytes, 500 to 65535 (default 7000)
    #[arg(short = 'H', long, value_name = "N")]
    pub header_min: Option<usize>,

    /// Minimum block length in bytes, 500 to 65535 (default 14000)
    #[arg(short = 'k', long, value_name = "N")]
    pub block_min: Option<usize>,

    /// Join block N with the next one before saving (repeatable)
    #[arg(short, long, value_name = "N", action = ArgAction::Append)]
    pub join: Vec<usize>,

    /// Print the block list as JSON (with --list)
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Read settings from this file instead of the default config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse `args`, accepting the glued `-n3` / `-d2` value form.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(args.into_iter().map(|arg| glued_value(arg.into())))
    }

    /// Parse the process arguments, exiting with a usage error on failure.
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }
}

/// Rewrite `-n<digits>` and `-d<digits>` to their `--long=<digits>` form.
///
/// The optional values require `=`, so a bare `-n` never swallows the TAP
/// path that follows it.
fn glued_value(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let long = match text.get(..2) {
        Some("-n") => "--names",
        Some("-d") => "--debug",
        _ => return arg,
    };
    let value = &text[2..];
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return arg;
    }
    OsString::from(format!("{}={}", long, value))
}

fn parse_naming_style(value: &str) -> Result<NamingStyle, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a naming style", value))?;
    NamingStyle::try_from(number).map_err(|e| e.to_string())
}
