//! IQR-based outlier capping.
//!
//! For every numeric column, values outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are counted and then
//! clipped to the nearest bound. Rows are never removed.
//!
//! A second pass is a no-op as long as no capped value sits at a rank that Q1 or Q3 is
//! interpolated from. In very small columns an outlier can be such a neighbour; capping it moves
//! the quartile, so each further pass tightens the fences again.

use crate::types::{ColumnKind, DataSet, DataType, Value};

use super::report::OutlierCounts;
use super::stats::{quantile_sorted, sorted};

/// Multiplier applied to the interquartile range to get the fences.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Fences computed from one column's distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// `q1 - 1.5 * (q3 - q1)`.
    pub lower: f64,
    /// `q3 + 1.5 * (q3 - q1)`.
    pub upper: f64,
}

impl IqrBounds {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// `true` if `v` lies strictly outside the fences.
    pub fn is_outlier(&self, v: f64) -> bool {
        v < self.lower || v > self.upper
    }
}

/// Compute IQR fences for `values`.
///
/// Returns `None` if `values` is empty or the fences are undefined (infinite inputs).
pub fn iqr_bounds(values: &[f64]) -> Option<IqrBounds> {
    let s = sorted(values);
    let q1 = quantile_sorted(&s, 0.25)?;
    let q3 = quantile_sorted(&s, 0.75)?;
    let iqr = q3 - q1;
    let bounds = IqrBounds {
        q1,
        q3,
        lower: q1 - IQR_MULTIPLIER * iqr,
        upper: q3 + IQR_MULTIPLIER * iqr,
    };
    (bounds.lower <= bounds.upper).then_some(bounds)
}

/// Cap outliers in every numeric column and return per-column outlier counts.
///
/// Counts are taken before clipping and only columns with at least one outlier are reported.
/// An `Int64` column that has outliers is widened to `Float64`, since the fences are generally
/// fractional. Missing values are left as they are; a column without any observed value is
/// skipped.
pub fn cap_outliers(dataset: &mut DataSet) -> OutlierCounts {
    let mut counts = OutlierCounts::new();

    for idx in dataset.schema.indexes_of_kind(ColumnKind::Numeric) {
        let values = dataset.numeric_values(idx);
        let Some(bounds) = iqr_bounds(&values) else {
            continue;
        };
        let outliers = values.iter().filter(|v| bounds.is_outlier(**v)).count();
        if outliers == 0 {
            continue;
        }

        if dataset.schema.fields[idx].data_type == DataType::Int64 {
            dataset.promote_to_float(idx);
        }
        dataset.update_column(idx, |value| {
            if let Value::Float64(v) = value {
                if !v.is_nan() {
                    *v = v.clamp(bounds.lower, bounds.upper);
                }
            }
        });

        let column = dataset.schema.fields[idx].name.clone();
        tracing::debug!(
            column = %column,
            outliers,
            lower = bounds.lower,
            upper = bounds.upper,
            "capped outliers"
        );
        counts.insert(column, outliers);
    }

    counts
}
