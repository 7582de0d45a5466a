/// This module contains the numeric stages of the ECG rhythm pipeline.
///
/// The available submodules are:
///
/// - `peaks`: Detects strict local amplitude maxima above a noise floor.
/// - `rhythm`: Classifies the intervals between adjacent peaks as fast, slow or normal.
/// - `summary`: Provides interval statistics (mean interval, SDNN, mean heart rate).
pub mod peaks;
pub mod rhythm;
pub mod summary;
