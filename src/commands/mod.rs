//! Command handlers for the itap binary.
//!
//! [`run`] walks the same steps for every invocation: open and validate the
//! tape, scan it, print the block list, then index, clean or split depending
//! on the flags.

pub mod clean;
pub mod index;
pub mod list;
mod prompt;
pub mod split;

use std::path::Path;

use anyhow::{bail, Context, Result};

use itap::cli::Cli;
use itap::{describe, repair_length_field, scan, Config, TapFile};

/// Run one itap invocation on `input`.
pub fn run(input: &Path, cli: &Cli, config: &Config) -> Result<()> {
    let tap = open_tap(input, cli.batch || cli.list)?;
    let verbose = config.output.verbosity > 0;

    let segments = scan(&tap, &config.scan);
    let infos = describe(&tap, &segments);

    if cli.json {
        list::print_json(&infos)?;
    } else {
        list::print_blocks(input, &infos, cli.list, verbose);
    }

    if cli.index {
        index::handle(input, &segments, &infos, cli.json)?;
    }
    if cli.list {
        return Ok(());
    }
    if cli.clean {
        return clean::handle(input, &tap, &infos);
    }

    let options = split::SplitOptions {
        batch: cli.batch,
        joins: cli.join.clone(),
        naming_style: config.output.naming_style,
        verbose,
    };
    split::handle(input, &tap, segments, infos, &options)
}

/// Read the tape, repairing a wrong header size field.
///
/// Without `quiet` the user is asked first; declining aborts the run.
fn open_tap(input: &Path, quiet: bool) -> Result<TapFile> {
    let tap = TapFile::open(input)
        .with_context(|| format!("Cannot read {}", input.display()))?;

    let Some(mismatch) = tap.length_mismatch() else {
        return Ok(tap);
    };

    if !quiet {
        println!();
        println!("File internal problem");
        println!(
            "Reported dimension 0x{:08X} instead of 0x{:08X}",
            mismatch.reported, mismatch.actual
        );
        if !prompt::confirm("Fix it?")? {
            bail!("TAP header size was not fixed");
        }
    }

    repair_length_field(input)
        .with_context(|| format!("Failed to fix header of {}", input.display()))?;
    if !quiet {
        println!("Fixed.");
    }

    Ok(tap)
}
