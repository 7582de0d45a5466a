//! Synthetic ECG-like signal generation.
//!
//! Produces a flat baseline with one narrow R spike per beat. Beats are placed at the given
//! RR intervals, optionally perturbed by uniform jitter drawn from a seeded RNG so that runs
//! are reproducible.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::signal::SyntheticEcg;
//!
//! let store = SyntheticEcg::default().generate(&[0.8, 0.8, 0.8]).unwrap();
//! assert!(store.len() > 500);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{EcgError, Result};
use crate::signal::store::{Sample, SignalStore};

/// Upper bound on the number of generated samples.
pub const MAX_SAMPLES: usize = 50_000_000;

// relative spike shape around the R sample
const SPIKE: [f64; 5] = [0.2, 0.5, 1.0, 0.5, 0.2];

/// Generator settings for a synthetic spike train.
#[derive(Debug, Clone)]
pub struct SyntheticEcg {
    /// Sampling rate in Hz.
    pub sample_rate: f64,
    /// Amplitude between beats.
    pub baseline: f64,
    /// Height of the R spike above the baseline.
    pub r_amplitude: f64,
    /// Time before the first beat and after the last one, in seconds.
    pub padding: f64,
    /// Maximum absolute RR perturbation in seconds.
    pub jitter: f64,
    pub seed: u64,
}

impl Default for SyntheticEcg {
    fn default() -> Self {
        Self {
            sample_rate: 250.0,
            baseline: 0.0,
            r_amplitude: 1.0,
            padding: 0.2,
            jitter: 0.0,
            seed: 42,
        }
    }
}

impl SyntheticEcg {
    /// Generates a signal whose beats are separated by `rr_intervals` seconds.
    ///
    /// The first beat sits at `padding` seconds, so `rr_intervals.len() + 1` beats are produced.
    /// Beat times are snapped to the sample grid.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::InvalidConfig`] if the sample rate, padding or jitter are not
    /// finite and non-negative (the sample rate must be positive) or an interval is not
    /// strictly positive, or if the signal would exceed [`MAX_SAMPLES`] samples.
    pub fn generate(&self, rr_intervals: &[f64]) -> Result<SignalStore> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(EcgError::InvalidConfig("sample rate must be positive"));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(EcgError::InvalidConfig("padding must be non-negative"));
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(EcgError::InvalidConfig("jitter must be non-negative"));
        }
        if rr_intervals.iter().any(|rr| !(rr.is_finite() && *rr > 0.0)) {
            return Err(EcgError::InvalidConfig("RR intervals must be positive"));
        }

        // keep spikes from overlapping after jitter
        let min_spacing = SPIKE.len() as f64 / self.sample_rate;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut beat_times = Vec::with_capacity(rr_intervals.len() + 1);
        let mut t = self.padding;
        beat_times.push(t);
        for &rr in rr_intervals {
            let offset = if self.jitter > 0.0 {
                rng.gen_range(-self.jitter..=self.jitter)
            } else {
                0.0
            };
            t += (rr + offset).max(min_spacing);
            beat_times.push(t);
        }

        let span = ((t + self.padding) * self.sample_rate).round();
        if !(span.is_finite() && span < MAX_SAMPLES as f64) {
            return Err(EcgError::InvalidConfig("synthetic signal exceeds the sample limit"));
        }
        let total = span as usize + 1;
        let mut amplitudes = vec![self.baseline; total];
        let half = SPIKE.len() / 2;
        for beat in beat_times {
            let center = (beat * self.sample_rate).round() as usize;
            for (k, weight) in SPIKE.iter().enumerate() {
                if let Some(idx) = (center + k).checked_sub(half) {
                    if let Some(value) = amplitudes.get_mut(idx) {
                        *value += weight * self.r_amplitude;
                    }
                }
            }
        }

        let samples = amplitudes
            .into_iter()
            .enumerate()
            .map(|(idx, amplitude)| Sample::new(idx as f64 / self.sample_rate, amplitude))
            .collect::<Vec<_>>();
        Ok(SignalStore::from(samples))
    }
}
