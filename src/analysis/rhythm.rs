//! Heart-rate classification of inter-peak intervals.
//!
//! Every pair of adjacent peaks yields exactly one [`IntervalLabel`]:
//! - interval above the slow cutoff: bradycardia
//! - otherwise, interval below the fast cutoff: tachycardia
//! - otherwise: normal heart rate
//!
//! Both comparisons are strict, so an interval equal to either cutoff is normal.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::analysis::peaks::Peak;
//! use ecg_rhythm::analysis::rhythm::{RhythmCategory, RhythmClassifier};
//!
//! let peaks = [Peak { index: 10, time: 0.0 }, Peak { index: 20, time: 0.5 }];
//! let result = RhythmClassifier::default().classify(&peaks);
//! assert_eq!(result.fast.len(), 1);
//! assert_eq!(result.fast[0].category, RhythmCategory::Fast);
//! ```

use std::fmt;

use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::peaks::Peak;

/// Intervals strictly longer than this (seconds) are classified as bradycardia.
pub const DEFAULT_SLOW_INTERVAL: f64 = 1.0;
/// Intervals strictly shorter than this (seconds) are classified as tachycardia.
pub const DEFAULT_FAST_INTERVAL: f64 = 0.6;

/// Heart-rate category of a single interval.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RhythmCategory {
    /// Tachycardia
    Fast,
    /// Bradycardia
    Slow,
    /// Normal heart rate
    Normal,
}

impl RhythmCategory {
    /// All categories in report order.
    pub const ALL: [RhythmCategory; 3] = [
        RhythmCategory::Normal,
        RhythmCategory::Fast,
        RhythmCategory::Slow,
    ];

    /// Text used at the start of a report line.
    pub fn label(&self) -> &'static str {
        match self {
            RhythmCategory::Fast => "Tachycardia",
            RhythmCategory::Slow => "Bradycardia",
            RhythmCategory::Normal => "Normal heart rate",
        }
    }

    /// Short name used in report file names.
    pub fn name(&self) -> &'static str {
        match self {
            RhythmCategory::Fast => "Tachycardia",
            RhythmCategory::Slow => "Bradycardia",
            RhythmCategory::Normal => "Normal",
        }
    }

    /// Parses a category from its short name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RhythmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified interval between two adjacent peaks, with the exact peak times.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalLabel {
    pub category: RhythmCategory,
    pub start: f64,
    pub end: f64,
}

impl IntervalLabel {
    pub fn interval(&self) -> f64 {
        self.end - self.start
    }
}

/// Renders the report line `<Label> detected between peaks at <start> and <end>`.
///
/// Times use the shortest decimal form that round-trips to the same `f64` (`1`, `0.5`,
/// `1234567.891`). They are never rounded to a fixed number of significant digits or switched
/// to exponent notation, so long or large timestamps keep every digit.
impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} detected between peaks at {} and {}",
            self.category.label(),
            self.start,
            self.end
        )
    }
}

/// Output of [`RhythmClassifier::classify`]: one ordered stream per category.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub fast: Vec<IntervalLabel>,
    pub slow: Vec<IntervalLabel>,
    pub normal: Vec<IntervalLabel>,
}

impl Classification {
    pub fn category(&self, category: RhythmCategory) -> &[IntervalLabel] {
        match category {
            RhythmCategory::Fast => &self.fast,
            RhythmCategory::Slow => &self.slow,
            RhythmCategory::Normal => &self.normal,
        }
    }

    /// Total number of labels across all categories.
    pub fn total(&self) -> usize {
        self.fast.len() + self.slow.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Formats the labels of one category as report lines.
    pub fn report_lines(&self, category: RhythmCategory) -> Vec<String> {
        self.category(category)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Interval classifier with fixed slow and fast cutoffs (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmClassifier {
    slow_interval: f64,
    fast_interval: f64,
}

impl Default for RhythmClassifier {
    fn default() -> Self {
        Self {
            slow_interval: DEFAULT_SLOW_INTERVAL,
            fast_interval: DEFAULT_FAST_INTERVAL,
        }
    }
}

impl RhythmClassifier {
    /// Creates a classifier.
    ///
    /// # Arguments
    ///
    /// * `slow_interval` - Intervals strictly longer than this are bradycardia.
    /// * `fast_interval` - Intervals strictly shorter than this are tachycardia.
    pub fn new(slow_interval: f64, fast_interval: f64) -> Self {
        Self {
            slow_interval,
            fast_interval,
        }
    }

    pub fn slow_interval(&self) -> f64 {
        self.slow_interval
    }

    pub fn fast_interval(&self) -> f64 {
        self.fast_interval
    }

    /// Categorises a single interval length.
    pub fn categorize(&self, interval: f64) -> RhythmCategory {
        if interval > self.slow_interval {
            RhythmCategory::Slow
        } else if interval < self.fast_interval {
            RhythmCategory::Fast
        } else {
            RhythmCategory::Normal
        }
    }

    /// Classifies the interval between every pair of adjacent peaks.
    ///
    /// Fewer than two peaks give an empty [`Classification`].
    pub fn classify(&self, peaks: &[Peak]) -> Classification {
        let mut result = Classification::default();
        for pair in peaks.windows(2) {
            let (start, end) = (pair[0].time, pair[1].time);
            let category = self.categorize(end - start);
            trace!("interval {start} -> {end} classified as {category}");
            let label = IntervalLabel {
                category,
                start,
                end,
            };
            match category {
                RhythmCategory::Fast => result.fast.push(label),
                RhythmCategory::Slow => result.slow.push(label),
                RhythmCategory::Normal => result.normal.push(label),
            }
        }
        result
    }
}

/// Time differences between adjacent peaks.
pub fn peak_intervals(peaks: &[Peak]) -> Vec<f64> {
    peaks.windows(2).map(|w| w[1].time - w[0].time).collect()
}
