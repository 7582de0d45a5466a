//! Reading and writing line oriented report files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{EcgError, Result};

/// Writes `lines` to `path`, one per line, replacing any existing file.
///
/// The file is flushed and closed before this function returns, on success and on failure.
///
/// # Errors
///
/// Returns [`EcgError::Io`] if the file cannot be created or written.
pub fn write_report<P, S>(path: P, lines: &[S]) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| EcgError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| EcgError::io(path, e))?;
    }
    writer.flush().map_err(|e| EcgError::io(path, e))?;
    info!("Results written to {}", path.display());
    Ok(())
}

/// Reads every line of the report at `path`.
///
/// # Errors
///
/// Returns [`EcgError::Io`] if the file does not exist or cannot be read. A missing report is
/// never treated as empty.
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EcgError::io(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| EcgError::io(path, e))
}
