//! Post-cleaning validation.

use crate::types::DataSet;

use super::report::{CleaningReport, ValidationReport};
use super::stats::{duplicate_row_count, total_missing};

/// Re-check the cleaned dataset and store the result in `report.validation`.
///
/// `original_rows` is the row count before the pipeline ran. Data loss is reported as
/// `0.0` when the input was empty.
pub fn validate(dataset: &DataSet, original_rows: usize, mut report: CleaningReport) -> CleaningReport {
    let rows_remaining = dataset.row_count();
    let data_loss_percentage = if original_rows == 0 {
        0.0
    } else {
        (1.0 - rows_remaining as f64 / original_rows as f64) * 100.0
    };

    let validation = ValidationReport {
        rows_remaining,
        missing_values_remaining: total_missing(dataset),
        duplicates_remaining: duplicate_row_count(dataset),
        data_loss_percentage,
    };
    tracing::debug!(
        rows = validation.rows_remaining,
        missing = validation.missing_values_remaining,
        duplicates = validation.duplicates_remaining,
        data_loss = validation.data_loss_percentage,
        "validation"
    );

    report.validation = Some(validation);
    report
}
