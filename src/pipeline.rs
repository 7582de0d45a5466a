//! Orchestration of the per-subject and two-subject flows.
//!
//! Each subject runs `load -> detect -> classify -> write` without sharing state with any other
//! subject, so two subjects are processed in parallel. File operations are independent: a failed
//! write is logged and recorded in the returned outcomes while the remaining files are still
//! produced.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::analysis::peaks::{Peak, PeakDetection, PeakDetector};
use crate::analysis::rhythm::{Classification, RhythmCategory, RhythmClassifier};
use crate::analysis::summary::RhythmSummary;
use crate::config::DetectionConfig;
use crate::error::{EcgError, Result};
use crate::report::{merge_reports, merged_report_name, subject_report_name, write_report};
use crate::signal::SignalStore;

/// Analysis result of one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectReport {
    pub name: String,
    pub peaks: Vec<Peak>,
    pub classification: Classification,
    /// `None` when fewer than two peaks were found.
    pub summary: Option<RhythmSummary>,
}

/// Result of a single file write or merge.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<()>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A processed subject together with the outcome of each of its report files.
#[derive(Debug)]
pub struct SubjectOutcome {
    pub report: SubjectReport,
    pub files: Vec<FileOutcome>,
}

impl SubjectOutcome {
    pub fn is_ok(&self) -> bool {
        self.files.iter().all(FileOutcome::is_ok)
    }
}

/// Outcome of a two-subject run.
#[derive(Debug)]
pub struct PairOutcome {
    pub first: Result<SubjectOutcome>,
    pub second: Result<SubjectOutcome>,
    /// Empty when either subject could not be loaded.
    pub merged: Vec<FileOutcome>,
}

impl PairOutcome {
    pub fn is_ok(&self) -> bool {
        let subject_ok = |s: &Result<SubjectOutcome>| s.as_ref().is_ok_and(SubjectOutcome::is_ok);
        subject_ok(&self.first)
            && subject_ok(&self.second)
            && self.merged.iter().all(FileOutcome::is_ok)
    }
}

/// Detector and classifier composed into the subject pipeline.
pub struct RhythmPipeline<D: PeakDetection> {
    detector: D,
    classifier: RhythmClassifier,
}

impl RhythmPipeline<PeakDetector> {
    /// Builds the default local maximum pipeline from validated thresholds.
    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.detector(), config.classifier()))
    }
}

impl Default for RhythmPipeline<PeakDetector> {
    fn default() -> Self {
        Self::new(PeakDetector::default(), RhythmClassifier::default())
    }
}

impl<D: PeakDetection> RhythmPipeline<D> {
    pub fn new(detector: D, classifier: RhythmClassifier) -> Self {
        Self {
            detector,
            classifier,
        }
    }

    /// Detects and classifies the peaks of an already loaded signal.
    pub fn analyze(&self, name: &str, store: &SignalStore) -> SubjectReport {
        let peaks = self.detector.detect(store);
        let classification = self.classifier.classify(&peaks);
        let summary = RhythmSummary::from_peaks(&peaks).ok();
        SubjectReport {
            name: name.to_string(),
            peaks,
            classification,
            summary,
        }
    }

    /// Loads, analyzes and writes the three category reports of one subject into `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input signal cannot be loaded. Report write failures are
    /// returned per file in [`SubjectOutcome::files`].
    pub fn process_subject(
        &self,
        name: &str,
        input: &Path,
        out_dir: &Path,
    ) -> Result<SubjectOutcome> {
        let store = SignalStore::load(input).inspect_err(|e| error!("{e}"))?;
        let report = self.analyze(name, &store);
        if let Some(summary) = &report.summary {
            info!(
                "{name}: {} peaks, mean interval {:.3} s, mean heart rate {:.1} bpm",
                summary.peak_count, summary.mean_interval, summary.mean_heart_rate
            );
        } else {
            warn!("{name}: fewer than two peaks detected, no intervals to classify");
        }
        let files = write_subject_reports(&report, out_dir);
        Ok(SubjectOutcome { report, files })
    }

    /// Processes two subjects in parallel, then merges their reports category by category.
    ///
    /// # Errors
    ///
    /// Returns [`EcgError::InvalidConfig`] without touching any file if both subjects have the
    /// same name, since their reports would share paths. Every other failure is reported per
    /// subject and per file in the returned [`PairOutcome`].
    pub fn process_pair(
        &self,
        first: (&str, &Path),
        second: (&str, &Path),
        out_dir: &Path,
    ) -> Result<PairOutcome>
    where
        D: Sync,
    {
        if first.0 == second.0 {
            return Err(EcgError::InvalidConfig("subject names must differ"));
        }
        let (first_outcome, second_outcome) = rayon::join(
            || self.process_subject(first.0, first.1, out_dir),
            || self.process_subject(second.0, second.1, out_dir),
        );
        let merged = if first_outcome.is_ok() && second_outcome.is_ok() {
            merge_subject_reports(first.0, second.0, out_dir)
        } else {
            warn!("skipping merged reports since a subject could not be loaded");
            Vec::new()
        };
        Ok(PairOutcome {
            first: first_outcome,
            second: second_outcome,
            merged,
        })
    }
}

/// Writes `<Subject>-<Category>.txt` for every category, continuing past failures.
pub fn write_subject_reports(report: &SubjectReport, out_dir: &Path) -> Vec<FileOutcome> {
    RhythmCategory::ALL
        .into_iter()
        .map(|category| {
            let path = out_dir.join(subject_report_name(&report.name, category));
            let lines = report.classification.report_lines(category);
            let result = write_report(&path, &lines).inspect_err(|e| error!("{e}"));
            FileOutcome { path, result }
        })
        .collect()
}

/// Writes `<Category>-<First>-<Second>.txt` for every category from the per-subject reports
/// found in `out_dir`, continuing past failures.
pub fn merge_subject_reports(first: &str, second: &str, out_dir: &Path) -> Vec<FileOutcome> {
    RhythmCategory::ALL
        .into_iter()
        .map(|category| merge_category(category, first, second, out_dir))
        .collect()
}

/// Merges a single category of two subjects' reports found in `out_dir`.
pub fn merge_category(
    category: RhythmCategory,
    first: &str,
    second: &str,
    out_dir: &Path,
) -> FileOutcome {
    let path = out_dir.join(merged_report_name(category, first, second));
    let result = merge_reports(
        out_dir.join(subject_report_name(first, category)),
        out_dir.join(subject_report_name(second, category)),
        &path,
    )
    .inspect_err(|e| error!("{e}"));
    FileOutcome { path, result }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::analysis::peaks::MockPeakDetection;
    use crate::report::{read_report, SEPARATOR};

    fn default_pipeline() -> RhythmPipeline<PeakDetector> {
        RhythmPipeline::default()
    }

    fn peaks_at(times: &[f64]) -> Vec<Peak> {
        times
            .iter()
            .enumerate()
            .map(|(index, &time)| Peak { index, time })
            .collect()
    }

    #[test]
    fn test_analyze_with_mock_detector() {
        let mut detector = MockPeakDetection::new();
        detector
            .expect_detect()
            .times(1)
            .returning(|_| peaks_at(&[0.0, 0.5, 1.2, 2.5]));
        let pipeline = RhythmPipeline::new(detector, RhythmClassifier::default());
        let report = pipeline.analyze("Person-1", &SignalStore::default());
        assert_eq!(report.name, "Person-1");
        assert_eq!(report.peaks.len(), 4);
        assert_eq!(report.classification.fast.len(), 1);
        assert_eq!(report.classification.normal.len(), 1);
        assert_eq!(report.classification.slow.len(), 1);
        assert_eq!(report.summary.map(|s| s.interval_count), Some(3));
    }

    #[test]
    fn test_analyze_without_peaks() {
        let pipeline = default_pipeline();
        let report = pipeline.analyze("flat", &SignalStore::parse("0 0 1 0 2 0"));
        assert!(report.peaks.is_empty());
        assert!(report.classification.is_empty());
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_process_subject_writes_three_reports() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("person1.txt");
        fs::write(&input, "0 0\n1 0.5\n2 0.05\n3 0.6\n4 0.05\n").unwrap();
        let outcome = default_pipeline()
            .process_subject("Person-1", &input, dir.path())
            .unwrap();
        assert!(outcome.is_ok());
        assert_eq!(outcome.files.len(), 3);
        assert_eq!(
            read_report(dir.path().join("Person-1-Bradycardia.txt")).unwrap(),
            vec!["Bradycardia detected between peaks at 1 and 3"]
        );
        assert!(read_report(dir.path().join("Person-1-Normal.txt"))
            .unwrap()
            .is_empty());
        assert!(read_report(dir.path().join("Person-1-Tachycardia.txt"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_process_subject_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            default_pipeline().process_subject("X", &dir.path().join("nope.txt"), dir.path());
        assert!(result.is_err());
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_write_failure_does_not_stop_other_categories() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in place of the normal report makes that single write fail
        fs::create_dir(dir.path().join("P-Normal.txt")).unwrap();
        let report = default_pipeline().analyze(
            "P",
            &SignalStore::parse("0 0 1 0.5 2 0.05 3 0.6 4 0.05"),
        );
        let outcomes = write_subject_reports(&report, dir.path());
        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_ok());
        assert!(outcomes[1].is_ok());
        assert!(outcomes[2].is_ok());
        assert!(dir.path().join("P-Bradycardia.txt").is_file());
    }

    #[test]
    fn test_merge_category_reads_subject_reports() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path().join("A-Tachycardia.txt"), &["a"]).unwrap();
        write_report(dir.path().join("B-Tachycardia.txt"), &["b"]).unwrap();
        let outcome = merge_category(RhythmCategory::Fast, "A", "B", dir.path());
        assert!(outcome.is_ok());
        assert_eq!(outcome.path, dir.path().join("Tachycardia-A-B.txt"));
        assert_eq!(read_report(&outcome.path).unwrap(), vec!["a", SEPARATOR, "b"]);
    }

    #[test]
    fn test_pair_with_same_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("signal.txt");
        fs::write(&input, "0 0\n1 0.5\n2 0.05\n3 0.6\n4 0.05\n").unwrap();
        let result = default_pipeline().process_pair(
            ("Person-1", input.as_path()),
            ("Person-1", input.as_path()),
            dir.path(),
        );
        assert!(matches!(result, Err(EcgError::InvalidConfig(_))));
        // only the input file is present
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_from_config_rejects_invalid_thresholds() {
        let config = DetectionConfig {
            fast_interval: 2.0,
            ..Default::default()
        };
        assert!(RhythmPipeline::from_config(&config).is_err());
    }
}
