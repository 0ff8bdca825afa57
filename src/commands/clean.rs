//! Cleaned TAP handler

use std::path::Path;

use anyhow::{Context, Result};

use itap::export::{emit_cleaned, write_output};
use itap::files::filename::cleaned_path;
use itap::{ProgramInfo, Segment, TapFile};

/// Write every block, trimmed, into `<stem>_cleaned.tap`.
pub fn handle(input: &Path, tap: &TapFile, infos: &[ProgramInfo]) -> Result<()> {
    let path = cleaned_path(input);
    let segments: Vec<Segment> = infos.iter().map(ProgramInfo::segment).collect();

    println!();
    println!("Creating cleaned TAP file: {}", path.display());

    let cleaned = emit_cleaned(tap, &segments)?;
    println!("  Original size: {} bytes", cleaned.original_len);
    println!("  Cleaned size:  {} bytes", cleaned.cleaned_len());
    println!(
        "  Reduction:     {} bytes ({:.1}%)",
        cleaned.reduction(),
        cleaned.reduction_percent()
    );

    println!();
    for (info, len) in infos.iter().zip(&cleaned.block_lens) {
        println!("  Block {:02} ({}): {} bytes", info.number, info.name, len);
    }

    write_output(&path, &cleaned.bytes)
        .with_context(|| format!("Cannot create cleaned file: {}", path.display()))?;

    println!();
    println!("Cleaned TAP file created successfully: {}", path.display());
    println!("  {} programs included", infos.len());
    Ok(())
}
