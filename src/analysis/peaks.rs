//! Peak detection on a sampled ECG signal.
//!
//! A peak is a strict local maximum whose amplitude exceeds a fixed noise floor. The first and
//! last sample of a signal can never be peaks, and flat tops (two equal neighbouring maxima)
//! are not reported since neither sample is strictly greater than both of its neighbours.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::analysis::peaks::{PeakDetection, PeakDetector};
//! use ecg_rhythm::signal::SignalStore;
//!
//! let store: SignalStore = vec![(0.0, 0.0), (1.0, 0.5), (2.0, 0.05), (3.0, 0.6), (4.0, 0.05)]
//!     .into_iter()
//!     .collect();
//! let peaks = PeakDetector::default().detect(&store);
//! assert_eq!(peaks.iter().map(|p| p.index).collect::<Vec<_>>(), vec![1, 3]);
//! ```

use log::debug;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSlice;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::signal::SignalStore;

/// Default amplitude floor below which no sample is considered a peak.
pub const DEFAULT_PEAK_THRESHOLD: f64 = 0.1;

/// A detected peak: the sample index within its store and that sample's time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub index: usize,
    pub time: f64,
}

/// Interface for peak detection algorithms.
#[cfg_attr(test, mockall::automock)]
pub trait PeakDetection {
    /// Returns the peaks of `store` in increasing index order.
    fn detect(&self, store: &SignalStore) -> Vec<Peak>;
}

/// Strict local maximum detector with a fixed amplitude threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDetector {
    threshold: f64,
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PEAK_THRESHOLD,
        }
    }
}

impl PeakDetector {
    /// Creates a detector that only accepts samples strictly above `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl PeakDetection for PeakDetector {
    fn detect(&self, store: &SignalStore) -> Vec<Peak> {
        let samples = store.samples();
        if samples.len() < 3 {
            return Vec::new();
        }
        let peaks: Vec<Peak> = samples
            .par_windows(3)
            .enumerate()
            .filter_map(|(offset, window)| {
                let (prev, current, next) = (window[0], window[1], window[2]);
                let is_peak = current.amplitude > self.threshold
                    && current.amplitude > prev.amplitude
                    && current.amplitude > next.amplitude;
                is_peak.then_some(Peak {
                    index: offset + 1,
                    time: current.time,
                })
            })
            .collect();
        debug!(
            "detected {} peaks in {} samples (threshold {})",
            peaks.len(),
            samples.len(),
            self.threshold
        );
        peaks
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    fn store(amplitudes: &[f64]) -> SignalStore {
        amplitudes
            .iter()
            .enumerate()
            .map(|(i, &a)| (i as f64, a))
            .collect()
    }

    #[test]
    fn test_detect_two_peaks() {
        let store: SignalStore = vec![
            (0.0, 0.0),
            (1.0, 0.5),
            (2.0, 0.05),
            (3.0, 0.6),
            (4.0, 0.05),
        ]
        .into_iter()
        .collect();
        let peaks = PeakDetector::default().detect(&store);
        assert_eq!(
            peaks,
            vec![
                Peak {
                    index: 1,
                    time: 1.0
                },
                Peak {
                    index: 3,
                    time: 3.0
                }
            ]
        );
    }

    #[test]
    fn test_short_signals_have_no_peaks() {
        let detector = PeakDetector::default();
        assert!(detector.detect(&store(&[])).is_empty());
        assert!(detector.detect(&store(&[1.0])).is_empty());
        assert!(detector.detect(&store(&[0.0, 1.0])).is_empty());
    }

    #[test]
    fn test_boundaries_are_never_peaks() {
        let detector = PeakDetector::default();
        let peaks = detector.detect(&store(&[5.0, 0.2, 0.3, 0.2, 5.0]));
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 2);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let detector = PeakDetector::default();
        assert!(detector.detect(&store(&[0.0, 0.8, 0.8, 0.0])).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let peaks = PeakDetector::default().detect(&store(&[0.0, 0.1, 0.0, 0.11, 0.0]));
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 3);
        let peaks = PeakDetector::new(0.5).detect(&store(&[0.0, 0.4, 0.0, 0.6, 0.0]));
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 3);
    }

    #[test]
    fn test_random_signals_hold_peak_invariants() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let detector = PeakDetector::default();
        for len in 0..64 {
            // coarse quantisation produces plenty of ties
            let amplitudes = (0..len)
                .map(|_| (rng.gen_range(0.0..1.0_f64) * 4.0).round() / 4.0)
                .collect::<Vec<_>>();
            let peaks = detector.detect(&store(&amplitudes));
            assert!(peaks.windows(2).all(|w| w[0].index < w[1].index));
            for peak in &peaks {
                assert!(peak.index > 0 && peak.index + 1 < len);
                let i = peak.index;
                assert!(amplitudes[i] > 0.1);
                assert!(amplitudes[i] > amplitudes[i - 1]);
                assert!(amplitudes[i] > amplitudes[i + 1]);
                assert_eq!(peak.time, i as f64);
            }
        }
    }
}
