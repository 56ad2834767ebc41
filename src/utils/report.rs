//! Diagnostic rendering
//!
//! Turns an [`Error`] into the human-readable block printed on stderr: header,
//! `file:line:column` locator, the offending source line and a `~~~↑` pointer.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::utils::Error;

const RULE: &str = "───────≼≽────────";

/// A rendered diagnostic
pub struct Report<'a> {
    error: &'a Error,
    line_of_code: String,
}

impl<'a> Report<'a> {
    /// Re-read the offending line from the file named in the error location
    pub fn from_disk(error: &'a Error) -> Self {
        let line_of_code = error
            .location()
            .map(|loc| source_line(&loc.file, loc.line()))
            .unwrap_or_default();
        Self { error, line_of_code }
    }

    /// Take the offending line from source text already in memory
    pub fn with_source(error: &'a Error, source: &str) -> Self {
        let line_of_code = error
            .location()
            .and_then(|loc| nth_line(source, loc.line()))
            .unwrap_or_default();
        Self { error, line_of_code }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(location) = self.error.location() else {
            return writeln!(f, "{}", self.error);
        };

        writeln!(f, "✦ [Error ✘]")?;
        writeln!(f, "└── {}", self.error.title())?;
        writeln!(f, "• [Line of Error] [{}]", location)?;
        writeln!(f, " ↓")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "\t{}", self.line_of_code)?;
        let pointer = "~".repeat(location.column().saturating_sub(1) as usize);
        writeln!(f, "\t{}↑", pointer)?;
        writeln!(f, "{}", RULE)?;

        if let Error::ExpectedFound { expected, found, .. } = self.error {
            writeln!(f, "• [Expected: {} But Found: {}]", expected, found)?;
        }
        Ok(())
    }
}

/// Line `line_number` (1-based) of `file`, or empty if unreadable
pub fn source_line(file: &str, line_number: u32) -> String {
    let Ok(handle) = File::open(file) else {
        log::debug!("cannot re-open {} for diagnostic excerpt", file);
        return String::new();
    };
    BufReader::new(handle)
        .lines()
        .nth(line_number.saturating_sub(1) as usize)
        .and_then(|line| line.ok())
        .unwrap_or_default()
}

fn nth_line(source: &str, line_number: u32) -> Option<String> {
    source
        .lines()
        .nth(line_number.saturating_sub(1) as usize)
        .map(str::to_string)
}
