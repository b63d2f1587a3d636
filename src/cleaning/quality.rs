//! Data-quality snapshot of a [`DataSet`].

use std::collections::BTreeMap;

use crate::types::DataSet;

use super::report::{QualityReport, BYTES_PER_MB};
use super::stats::duplicate_row_count;

/// Compute a [`QualityReport`] without mutating the dataset.
///
/// Duplicates are exact full-row matches counted from the second occurrence. An empty dataset
/// yields zeroed counts.
pub fn check_quality(dataset: &DataSet) -> QualityReport {
    let missing_values: BTreeMap<String, usize> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| (field.name.clone(), dataset.missing_count(idx)))
        .collect();

    let report = QualityReport {
        missing_values,
        duplicates: duplicate_row_count(dataset),
        total_rows: dataset.row_count(),
        memory_usage: dataset.estimated_memory_bytes() as f64 / BYTES_PER_MB,
    };

    tracing::debug!(
        rows = report.total_rows,
        missing = report.total_missing(),
        duplicates = report.duplicates,
        memory_mb = report.memory_usage,
        "quality check"
    );
    report
}
