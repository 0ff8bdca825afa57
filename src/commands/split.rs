//! Split handler: optional joins, confirmation, then one TAP per block.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use tracing::{error, trace};

use itap::export::{emit_segment, write_output};
use itap::files::filename::block_path;
use itap::scan::ensure_splittable;
use itap::{describe, merge, NamingStyle, ProgramInfo, Segment, TapFile};

use super::{list, prompt};

/// Settings for a split run.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub batch: bool,
    /// 1-based block numbers to join with their successor, applied in order.
    pub joins: Vec<usize>,
    pub naming_style: NamingStyle,
    pub verbose: bool,
}

pub fn handle(
    input: &Path,
    tap: &TapFile,
    segments: Vec<Segment>,
    infos: Vec<ProgramInfo>,
    options: &SplitOptions,
) -> Result<()> {
    ensure_splittable(&segments)?;

    let mut segments = apply_joins(segments, &options.joins)?;
    let mut infos = if options.joins.is_empty() {
        infos
    } else {
        let infos = describe(tap, &segments);
        list::print_blocks(input, &infos, false, options.verbose);
        infos
    };

    if !options.batch {
        while segments.len() > 1 {
            println!();
            if !prompt::confirm("Do you want to join 2 neighbour blocks?")? {
                break;
            }
            let Some(first) = prompt::choose_block(segments.len() - 1)? else {
                break;
            };
            segments = merge(segments, first - 1)?;
            infos = describe(tap, &segments);
            list::print_blocks(input, &infos, false, options.verbose);
        }
    }

    println!();
    println!("Now {} blocks will be created", infos.len());
    println!("Any file with the same name will be overwritten!");
    println!("TAP Version : {}", tap.version());

    if !options.batch && !prompt::confirm("Go on?")? {
        bail!("Cancelled, no files written");
    }
    println!();

    save_blocks(input, tap, &infos, options.naming_style)
}

/// Join each listed block with the one after it.
fn apply_joins(mut segments: Vec<Segment>, joins: &[usize]) -> Result<Vec<Segment>> {
    for &number in joins {
        let count = segments.len();
        if number == 0 {
            bail!("Cannot join block 0, blocks are numbered from 1");
        }
        segments = merge(segments, number - 1)
            .with_context(|| format!("Cannot join block {} ({} blocks left)", number, count))?;
    }
    Ok(segments)
}

/// Write every block in parallel, reporting each outcome in block order.
///
/// A failed block does not stop the others.
fn save_blocks(
    input: &Path,
    tap: &TapFile,
    infos: &[ProgramInfo],
    style: NamingStyle,
) -> Result<()> {
    let results: Vec<Result<PathBuf>> = infos
        .par_iter()
        .map(|info| save_block(input, tap, info, style))
        .collect();

    let mut failed = 0;
    for (info, result) in infos.iter().zip(results) {
        match result {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                failed += 1;
                error!(block = info.number, "{:#}", e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} blocks could not be written", failed, infos.len());
    }

    println!();
    println!("Operation successfully completed.");
    Ok(())
}

fn save_block(
    input: &Path,
    tap: &TapFile,
    info: &ProgramInfo,
    style: NamingStyle,
) -> Result<PathBuf> {
    trace!(
        name = %info.name,
        start = info.start,
        end = info.end,
        "saving block"
    );
    let path = block_path(input, info.number, &info.name, style)?;
    let bytes = emit_segment(tap, &info.segment())?;
    write_output(&path, &bytes)?;
    Ok(path)
}
