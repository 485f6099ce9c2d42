//! Prompt helpers with inquire → stdin fallback.
//!
//! Every prompt gracefully degrades: if `inquire` fails (e.g. not a real
//! TTY), we fall back to plain stdin prompts.

use inquire::Confirm;
use std::io::{self, BufRead, Write};

/// Read a trimmed line from stdin.
fn read_line() -> anyhow::Result<String> {
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    Ok(input.trim().to_string())
}

/// Confirm prompt with fallback.
pub fn confirm(message: &str, default: bool) -> anyhow::Result<bool> {
    match Confirm::new(message).with_default(default).prompt() {
        Ok(v) => Ok(v),
        Err(
            inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted,
        ) => {
            anyhow::bail!("Cancelled");
        }
        Err(_) => {
            let hint = if default { "Y/n" } else { "y/N" };
            print!("? {} ({}) ", message, hint);
            io::stdout().flush()?;
            let input = read_line()?;
            match input.to_lowercase().as_str() {
                "y" | "yes" => Ok(true),
                "n" | "no" => Ok(false),
                _ => Ok(default),
            }
        }
    }
}

/// Block until the user presses Enter.
pub fn pause(message: &str) -> anyhow::Result<()> {
    print!("{message}");
    io::stdout().flush()?;
    read_line()?;
    Ok(())
}
