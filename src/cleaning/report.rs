//! Report types produced by the cleaning stages.
//!
//! [`CleaningReport`] is the cumulative report assembled by the pipeline driver. It serializes to
//! a JSON object with the keys `initial_quality`, `outliers_removed` and `validation`; sections
//! that have not been populated yet are omitted.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CleaningResult;

/// Bytes per megabyte used for [`QualityReport::memory_usage`].
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Snapshot of a dataset's missing-value, duplicate, size and row-count metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Column name → number of missing values (every column is listed, including zeros).
    pub missing_values: BTreeMap<String, usize>,
    /// Rows identical to an earlier row.
    pub duplicates: usize,
    /// Row count.
    pub total_rows: usize,
    /// Approximate in-memory size in megabytes.
    pub memory_usage: f64,
}

impl QualityReport {
    /// Sum of missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}

/// Column name → number of values that fell outside the IQR bounds.
///
/// Only columns with at least one outlier are present.
pub type OutlierCounts = BTreeMap<String, usize>;

/// Post-cleaning checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Row count after cleaning.
    pub rows_remaining: usize,
    /// Missing values left across all columns.
    pub missing_values_remaining: usize,
    /// Duplicate rows left (duplicates are reported, never removed).
    pub duplicates_remaining: usize,
    /// `(1 - rows_remaining / original_rows) * 100`.
    pub data_loss_percentage: f64,
}

/// Cumulative report, populated stage by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    /// Quality of the input, before any stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_quality: Option<QualityReport>,
    /// Outliers capped per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers_removed: Option<OutlierCounts>,
    /// Post-cleaning validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

impl CleaningReport {
    /// Render the report as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CleaningError::Report`] if serialization fails.
    pub fn to_json(&self) -> CleaningResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Render the report as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CleaningError::Report`] if serialization fails.
    pub fn to_json_pretty(&self) -> CleaningResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = &self.initial_quality {
            writeln!(
                f,
                "initial_quality: rows={}, missing={}, duplicates={}, memory={:.4} MB",
                q.total_rows,
                q.total_missing(),
                q.duplicates,
                q.memory_usage
            )?;
        }
        if let Some(outliers) = &self.outliers_removed {
            let total: usize = outliers.values().sum();
            writeln!(f, "outliers_removed: {total} in {} column(s)", outliers.len())?;
            for (column, count) in outliers {
                writeln!(f, "  {column}: {count}")?;
            }
        }
        if let Some(v) = &self.validation {
            writeln!(
                f,
                "validation: rows={}, missing={}, duplicates={}, data_loss={:.2}%",
                v.rows_remaining,
                v.missing_values_remaining,
                v.duplicates_remaining,
                v.data_loss_percentage
            )?;
        }
        Ok(())
    }
}
