//! Interactive prompts
//!
//! All operator input flows through here: yes/no confirmations, free-form
//! names, and the 1-based numeric selection used when config discovery is
//! ambiguous. Bad selection input is a hard error, never a silent default.

use std::io::{self, BufRead, Write};

use crate::error::{CliError, Result};

/// Answers the apply engine's namespace-creation question from stdin
pub struct StdinPrompt;

impl imprint_kube::Prompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        confirm(message)
    }
}

/// Ask a yes/no question; anything but y/yes is a no
pub fn confirm(message: &str) -> bool {
    print!("{message} [y/N]: ");
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Read one trimmed line of free-form input
pub fn read_line(message: &str) -> Result<String> {
    print!("{message}: ");
    let _ = io::stdout().flush();
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(CliError::from)?;
    Ok(input.trim().to_string())
}

/// Ask for a 1-based selection out of `count` items; returns a 0-based index
pub fn choose(message: &str, count: usize) -> Result<usize> {
    let input = read_line(&format!("{message} (1-{count})"))?;
    parse_choice(&input, count)
}

fn parse_choice(input: &str, count: usize) -> Result<usize> {
    let selection: usize = input.trim().parse().map_err(|_| {
        CliError::usage(format!("invalid input '{}': please enter a number", input.trim()))
    })?;
    if selection < 1 || selection > count {
        return Err(CliError::usage(format!(
            "invalid choice {selection}: please choose between 1 and {count}"
        )));
    }
    Ok(selection - 1)
}
