//! File naming conventions for report files.

use crate::analysis::rhythm::RhythmCategory;

/// Per-subject report name: `<Subject>-<Category>.txt`.
pub fn subject_report_name(subject: &str, category: RhythmCategory) -> String {
    format!("{subject}-{}.txt", category.name())
}

/// Merged report name: `<Category>-<SubjectA>-<SubjectB>.txt`.
pub fn merged_report_name(category: RhythmCategory, first: &str, second: &str) -> String {
    format!("{}-{first}-{second}.txt", category.name())
}
