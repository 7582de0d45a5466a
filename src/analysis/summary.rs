//! Summary statistics over the intervals between detected peaks.
//!
//! Currently the following values are reported:
//! - mean interval (seconds)
//! - SDNN, the standard deviation of the intervals (seconds)
//! - mean heart rate (beats per minute)

use nalgebra::DVectorView;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::peaks::Peak;
use crate::analysis::rhythm::peak_intervals;
use crate::error::{EcgError, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RhythmSummary {
    pub peak_count: usize,
    pub interval_count: usize,
    pub mean_interval: f64,
    pub sdnn: f64,
    pub mean_heart_rate: f64,
}

impl RhythmSummary {
    /// Computes interval statistics for a peak sequence.
    ///
    /// # Arguments
    ///
    /// * `peaks` - Detected peaks in time order.
    ///
    /// # Returns
    ///
    /// * `Result<RhythmSummary>` - The statistics, with `mean_heart_rate = 60 / mean_interval`.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::InsufficientData`] if fewer than two peaks are given.
    pub fn from_peaks(peaks: &[Peak]) -> Result<Self> {
        if peaks.len() < 2 {
            return Err(EcgError::InsufficientData {
                required: 2,
                actual: peaks.len(),
            });
        }
        let intervals = peak_intervals(peaks);
        let view = DVectorView::from(intervals.as_slice());
        let mean_interval = view.mean();
        Ok(Self {
            peak_count: peaks.len(),
            interval_count: intervals.len(),
            mean_interval,
            sdnn: view.variance().sqrt(),
            mean_heart_rate: 60.0 / mean_interval,
        })
    }
}
