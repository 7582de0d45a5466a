//! ECG rhythm classification
//!
//! This crate detects amplitude peaks in sampled ECG signals, classifies the intervals between
//! adjacent peaks as tachycardia, bradycardia or normal heart rate, and writes the results as
//! per-subject and merged text reports.
//!
//! # Example
//!
//! ```rust
//! use ecg_rhythm::analysis::peaks::{PeakDetection, PeakDetector};
//! use ecg_rhythm::analysis::rhythm::RhythmClassifier;
//! use ecg_rhythm::signal::SignalStore;
//!
//! let store = SignalStore::parse("0 0 1 0.5 2 0.05 3 0.6 4 0.05");
//! let peaks = PeakDetector::default().detect(&store);
//! let result = RhythmClassifier::default().classify(&peaks);
//! assert_eq!(
//!     result.slow[0].to_string(),
//!     "Bradycardia detected between peaks at 1 and 3"
//! );
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod signal;

pub use config::DetectionConfig;
pub use error::{EcgError, Result};
