//! Storage for one subject's sampled ECG signal.
//!
//! The input format is a plain text stream of whitespace separated `<time> <amplitude>` pairs.
//! Newlines carry no meaning; tokens are consumed two at a time. Reading stops at the first
//! token that is not a finite number (or not valid UTF-8), and everything after it is ignored.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::signal::SignalStore;
//!
//! let store = SignalStore::parse("0 0.0\n1 0.5 2 0.05\nend");
//! assert_eq!(store.len(), 3);
//! assert_eq!(store.samples()[1].amplitude, 0.5);
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EcgError, Result};

/// A single time-stamped amplitude value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub time: f64,
    pub amplitude: f64,
}

impl Sample {
    pub fn new(time: f64, amplitude: f64) -> Self {
        Self { time, amplitude }
    }
}

/// Ordered samples of exactly one subject.
///
/// Samples are kept in read order. Ordering by time is assumed, not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalStore {
    samples: Vec<Sample>,
}

impl SignalStore {
    /// Loads a signal from a text file.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the `<time> <amplitude>` text file.
    ///
    /// # Returns
    ///
    /// * `Result<SignalStore>` - The parsed store.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::Io`] if the file cannot be opened or read. Unparsable content,
    /// including bytes that are not valid UTF-8, is never an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| EcgError::io(path, e))?;
        let store = Self::parse_bytes(&bytes);
        info!(
            "Data loaded from {}. Total records: {}",
            path.display(),
            store.len()
        );
        Ok(store)
    }

    /// Parses whitespace separated `<time> <amplitude>` pairs.
    ///
    /// Parsing ends at the first token that is not a finite number. A trailing unpaired value
    /// is dropped.
    pub fn parse(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes())
    }

    /// Byte oriented variant of [`SignalStore::parse`].
    ///
    /// A token that is not valid UTF-8 ends the stream like any other unparsable token, so
    /// samples read before a binary or non-UTF-8 trailer are kept.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let mut samples = Vec::new();
        let mut tokens = bytes
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty());
        loop {
            let Some(time) = next_number(&mut tokens) else {
                break;
            };
            let Some(amplitude) = next_number(&mut tokens) else {
                break;
            };
            samples.push(Sample { time, amplitude });
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.amplitude)
    }
}

impl From<Vec<Sample>> for SignalStore {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<(f64, f64)> for SignalStore {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            samples: iter
                .into_iter()
                .map(|(time, amplitude)| Sample { time, amplitude })
                .collect(),
        }
    }
}

// nan and inf spellings are rejected like any other non-numeric token
fn next_number<'a>(tokens: &mut impl Iterator<Item = &'a [u8]>) -> Option<f64> {
    let token = tokens.next()?;
    let value = std::str::from_utf8(token)
        .ok()
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite());
    if value.is_none() {
        debug!(
            "stopped reading signal at unparsable token {:?}",
            String::from_utf8_lossy(token)
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_line_pairs() {
        let store = SignalStore::parse("0 0\n1 0.5\n2 0.05\n");
        assert_eq!(
            store.samples(),
            &[
                Sample::new(0.0, 0.0),
                Sample::new(1.0, 0.5),
                Sample::new(2.0, 0.05)
            ]
        );
    }

    #[test]
    fn test_parse_ignores_line_structure() {
        let store = SignalStore::parse("0 0 1\n0.5   2\t0.05");
        assert_eq!(store.len(), 3);
        assert_eq!(store.times().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
        assert_eq!(
            store.amplitudes().collect::<Vec<_>>(),
            vec![0.0, 0.5, 0.05]
        );
    }

    #[test]
    fn test_parse_stops_at_bad_token() {
        let store = SignalStore::parse("0 0\n1 0.5\nx 7\n3 0.6\n");
        assert_eq!(store.len(), 2);
        // a bad amplitude discards the half read pair as well
        let store = SignalStore::parse("0 0\n1 oops\n3 0.6\n");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parse_stops_at_non_finite_values() {
        let store = SignalStore::parse("0 0\n1 0.5\n2 0.05\nnan 0.6\n4 0.05\n5 0.7\n6 inf\n");
        assert_eq!(store.len(), 3);
        let store = SignalStore::parse("0 0\n1 Infinity\n2 0.05");
        assert_eq!(store.len(), 1);
        assert!(store.samples().iter().all(|s| s.time.is_finite() && s.amplitude.is_finite()));
    }

    #[test]
    fn test_parse_stops_at_non_utf8_token() {
        let store = SignalStore::parse_bytes(b"0 0\n1 0.5\n2 0.05\n# caf\xe9 end\n");
        assert_eq!(store.len(), 3);
        let store = SignalStore::parse_bytes(b"0 0\n1 \xff\xfe\n2 0.05");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_keeps_samples_before_non_utf8_trailer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0 0\n1 0.5\n2 0.05\n# caf\xe9 end\n").unwrap();
        let store = SignalStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.samples()[2], Sample::new(2.0, 0.05));
    }

    #[test]
    fn test_parse_drops_dangling_value() {
        let store = SignalStore::parse("0 0\n1 0.5\n2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(SignalStore::parse("").is_empty());
        assert!(SignalStore::parse("   \n\n").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0\n1 0.5\n2 0.05\n3 0.6\n4 0.05").unwrap();
        let store = SignalStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.samples()[3], Sample::new(3.0, 0.6));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SignalStore::load(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(EcgError::Io { .. })));
    }

    #[test]
    fn test_from_pairs() {
        let store: SignalStore = vec![(0.0, 1.0), (0.5, 2.0)].into_iter().collect();
        assert_eq!(store.samples()[1], Sample::new(0.5, 2.0));
    }
}
