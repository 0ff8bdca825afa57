//! Index file handler

use std::path::Path;

use anyhow::{Context, Result};

use itap::export::{emit_index, write_output};
use itap::files::filename::index_path;
use itap::{ProgramInfo, ProgramName, Segment};

/// Write `<stem>.idx` next to the input.
///
/// The report is skipped when `quiet`, leaving stdout to the JSON listing.
pub fn handle(
    input: &Path,
    segments: &[Segment],
    infos: &[ProgramInfo],
    quiet: bool,
) -> Result<()> {
    let path = index_path(input);
    let names: Vec<ProgramName> = infos.iter().map(|info| info.name.clone()).collect();

    let text = emit_index(segments, &names);
    write_output(&path, text.as_bytes())
        .with_context(|| format!("Cannot create index file: {}", path.display()))?;

    if quiet {
        return Ok(());
    }
    println!();
    println!("Index file created: {}", path.display());
    println!("  {} programs indexed", segments.len());
    Ok(())
}
