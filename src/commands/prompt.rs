//! Interactive questions on stdin.
//!
//! Every prompt answers "no" when stdin is not a terminal, so piped or
//! scripted runs never block waiting for input.

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
pub fn confirm(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --batch to proceed without questions");
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let input = read_line()?;
    Ok(is_yes(&input))
}

/// Ask for a block number between 1 and `max`.
///
/// An empty or unparsable answer cancels the choice.
pub fn choose_block(max: usize) -> Result<Option<usize>> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    print!("Which is the first block? [1-{}, Enter to cancel] ", max);
    io::stdout().flush()?;

    let input = read_line()?;
    Ok(parse_choice(&input, max))
}

fn read_line() -> Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}

fn is_yes(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

fn parse_choice(input: &str, max: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=max).contains(n))
}
