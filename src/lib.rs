//! iTAP - split Commodore cassette captures into one TAP file per program.
//!
//! The library decodes the pulse stream of a TAP container, finds the pilot
//! tones that start each program, and produces trimmed per-program
//! containers, a single cleaned container, or a text index.
//!
//! ```no_run
//! use itap::{scan, Config, TapFile};
//!
//! let tap = TapFile::open("games.tap")?;
//! let segments = scan(&tap, &Config::default().scan);
//! for segment in &segments {
//!     println!("{:#010x} {}", segment.start, itap::decode_name(&tap, segment));
//! }
//! # Ok::<(), itap::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod program;
pub mod pulse;
pub mod scan;
pub mod tap;
pub mod trim;

pub use config::{Config, OutputConfig, ScanConfig};
pub use error::{Error, Result};
pub use export::{emit_cleaned, emit_index, emit_segment, CleanedTap};
pub use files::filename::NamingStyle;
pub use program::{decode_header, decode_name, describe, ProgramHeader, ProgramInfo, ProgramName};
pub use scan::{merge, scan, Segment};
pub use tap::{repair_length_field, LengthMismatch, TapFile, TapHeader};
