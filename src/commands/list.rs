//! Block list output.

use std::path::Path;

use anyhow::Result;

use itap::ProgramInfo;

/// Print one line per block, with header details when `verbose`.
pub fn print_blocks(input: &Path, infos: &[ProgramInfo], list_mode: bool, verbose: bool) {
    println!();
    if list_mode {
        println!("{}:", input.display());
    } else {
        println!("Blocks list:");
    }

    for info in infos {
        println!("{}", format_block(info, verbose));
    }
}

/// Print the block list as pretty JSON.
pub fn print_json(infos: &[ProgramInfo]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(infos)?);
    Ok(())
}

/// `01)    74565 bytes, 0x00000014 to 0x00012358 - NAME`
fn format_block(info: &ProgramInfo, verbose: bool) -> String {
    let mut line = format!(
        "{:02}) {:8} bytes, 0x{:08X} to 0x{:08X} - {}",
        info.number,
        info.size,
        info.start,
        info.segment().last_offset(),
        info.name.padded()
    );

    if verbose {
        if let Some(header) = &info.header {
            line.push_str(&format!(
                " type {:02X} from ${:04X} to ${:04X}",
                header.file_type, header.start_address, header.end_address
            ));
        }
    }

    line
}
