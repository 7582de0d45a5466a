//! Merging two subjects' reports of the same category.
//!
//! A merged report holds every line of the first report, one separator line, then every line
//! of the second report. Lines are never interleaved or reordered.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::report::merge;
//!
//! let merged = merge(&["x".to_string()], &["y".to_string()]);
//! assert_eq!(merged, vec!["x", "**************", "y"]);
//! ```

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::report::io::{read_report, write_report};

/// Line written between the two subjects of a merged report.
pub const SEPARATOR: &str = "**************";

/// Concatenates `first`, the separator and `second`.
pub fn merge<S: AsRef<str>>(first: &[S], second: &[S]) -> Vec<String> {
    let mut merged = Vec::with_capacity(first.len() + second.len() + 1);
    merged.extend(first.iter().map(|l| l.as_ref().to_string()));
    merged.push(SEPARATOR.to_string());
    merged.extend(second.iter().map(|l| l.as_ref().to_string()));
    merged
}

/// Reads two report files fully and writes their merge to `destination`.
///
/// # Errors
///
/// Returns [`crate::error::EcgError::Io`] if either source cannot be read or the destination
/// cannot be written. When a source fails, the destination is left untouched.
pub fn merge_reports<A, B, D>(first: A, second: B, destination: D) -> Result<()>
where
    A: AsRef<Path>,
    B: AsRef<Path>,
    D: AsRef<Path>,
{
    let first_lines = read_report(first.as_ref())?;
    let second_lines = read_report(second.as_ref())?;
    debug!(
        "merging {} + {} lines into {}",
        first_lines.len(),
        second_lines.len(),
        destination.as_ref().display()
    );
    write_report(destination, &merge(&first_lines, &second_lines))
}
