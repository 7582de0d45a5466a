//! Detection thresholds shared by the pipeline stages.
//!
//! With the `serde` feature the configuration can be read from a JSON file. Fields missing from
//! the file keep their default values:
//!
//! ```json
//! { "peak_threshold": 0.1, "slow_interval": 1.0, "fast_interval": 0.6 }
//! ```

#[cfg(feature = "serde")]
use std::fs;
#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::peaks::{PeakDetector, DEFAULT_PEAK_THRESHOLD};
use crate::analysis::rhythm::{RhythmClassifier, DEFAULT_FAST_INTERVAL, DEFAULT_SLOW_INTERVAL};
#[cfg(feature = "serde")]
use crate::error::EcgError;
use crate::error::Result;

/// Thresholds injected into [`PeakDetector`] and [`RhythmClassifier`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    /// Minimum amplitude of a peak (exclusive).
    pub peak_threshold: f64,
    /// Intervals longer than this many seconds are bradycardia.
    pub slow_interval: f64,
    /// Intervals shorter than this many seconds are tachycardia.
    pub fast_interval: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            peak_threshold: DEFAULT_PEAK_THRESHOLD,
            slow_interval: DEFAULT_SLOW_INTERVAL,
            fast_interval: DEFAULT_FAST_INTERVAL,
        }
    }
}

impl DetectionConfig {
    /// Checks that all thresholds are finite and `0 < fast_interval <= slow_interval`.
    pub fn validate(&self) -> Result<()> {
        use crate::error::EcgError::InvalidConfig;

        if !self.peak_threshold.is_finite() {
            return Err(InvalidConfig("peak threshold must be finite"));
        }
        if !(self.slow_interval.is_finite() && self.fast_interval.is_finite()) {
            return Err(InvalidConfig("interval cutoffs must be finite"));
        }
        if self.fast_interval <= 0.0 {
            return Err(InvalidConfig("fast interval cutoff must be positive"));
        }
        if self.fast_interval > self.slow_interval {
            return Err(InvalidConfig(
                "fast interval cutoff must not exceed the slow interval cutoff",
            ));
        }
        Ok(())
    }

    pub fn detector(&self) -> PeakDetector {
        PeakDetector::new(self.peak_threshold)
    }

    pub fn classifier(&self) -> RhythmClassifier {
        RhythmClassifier::new(self.slow_interval, self.fast_interval)
    }

    /// Reads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::Io`] if the file cannot be read, [`EcgError::Config`] if it is not
    /// valid JSON for this structure and [`EcgError::InvalidConfig`] if validation fails.
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EcgError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}
