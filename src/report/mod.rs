//! This module contains the text report side of the pipeline.
//!
//! The `io` submodule reads and writes report files, one line per entry.
//! The `merge` submodule combines two subjects' reports of the same category.
//! The `naming` submodule holds the file naming conventions for per-subject and merged reports.
pub mod io;
pub mod merge;
pub mod naming;

pub use io::{read_report, write_report};
pub use merge::{merge, merge_reports, SEPARATOR};
pub use naming::{merged_report_name, subject_report_name};
