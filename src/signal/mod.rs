//! This module contains the raw signal side of the pipeline.
//!
//! The `store` submodule loads and holds the ordered `(time, amplitude)` samples of one subject.
//! The `synth` submodule generates synthetic ECG-like signals with known beat intervals.
pub mod store;
pub mod synth;

pub use store::{Sample, SignalStore};
pub use synth::SyntheticEcg;
