//! Missing-value imputation.
//!
//! Numeric columns are filled with their median, categorical and boolean columns with their
//! mode. Datetime columns are left alone. Columns with no missing values are no-ops. A column
//! with no observed values, or whose median is not finite, is skipped because no usable fill
//! value exists for it.

use crate::types::{ColumnKind, DataSet, DataType, Value};

use super::stats::{integral_median, median, mode};

/// Values written into one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Imputation {
    /// Column name.
    pub column: String,
    /// Number of cells filled.
    pub filled: usize,
    /// Value written into each missing cell.
    pub fill_value: Value,
}

/// Result of [`impute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImputeOutcome {
    /// Columns that received values, in schema order within each group.
    pub imputed: Vec<Imputation>,
    /// Columns left untouched because every value is missing or the median is not finite.
    pub skipped_all_missing: Vec<String>,
}

/// Fill missing entries: median for numeric columns, mode for categorical and boolean columns.
///
/// An `Int64` column whose median is fractional is widened to `Float64` before filling.
pub fn impute(dataset: &mut DataSet) -> ImputeOutcome {
    let mut outcome = ImputeOutcome::default();

    for idx in dataset.schema.indexes_of_kind(ColumnKind::Numeric) {
        if dataset.missing_count(idx) == 0 {
            continue;
        }
        let Some(m) = median(&dataset.numeric_values(idx)).filter(|m| m.is_finite()) else {
            skip(dataset, idx, &mut outcome);
            continue;
        };
        let fill_value = if dataset.schema.fields[idx].data_type == DataType::Int64 {
            let ints: Vec<i64> = dataset
                .column(idx)
                .filter_map(|v| match v {
                    Value::Int64(i) => Some(*i),
                    _ => None,
                })
                .collect();
            match integral_median(&ints) {
                Some(i) => Value::Int64(i),
                None => {
                    dataset.promote_to_float(idx);
                    Value::Float64(m)
                }
            }
        } else {
            Value::Float64(m)
        };
        fill(dataset, idx, fill_value, &mut outcome);
    }

    let mut categorical = dataset.schema.indexes_of_kind(ColumnKind::Categorical);
    categorical.extend(dataset.schema.indexes_of_kind(ColumnKind::Boolean));
    categorical.sort_unstable();
    for idx in categorical {
        if dataset.missing_count(idx) == 0 {
            continue;
        }
        match mode(dataset.column(idx)) {
            Some(fill_value) => fill(dataset, idx, fill_value, &mut outcome),
            None => skip(dataset, idx, &mut outcome),
        }
    }

    outcome
}

fn fill(dataset: &mut DataSet, idx: usize, fill_value: Value, outcome: &mut ImputeOutcome) {
    let mut filled = 0;
    dataset.update_column(idx, |value| {
        if value.is_missing() {
            *value = fill_value.clone();
            filled += 1;
        }
    });

    let column = dataset.schema.fields[idx].name.clone();
    tracing::debug!(column = %column, filled, value = %fill_value, "imputed missing values");
    outcome.imputed.push(Imputation {
        column,
        filled,
        fill_value,
    });
}

fn skip(dataset: &DataSet, idx: usize, outcome: &mut ImputeOutcome) {
    let column = dataset.schema.fields[idx].name.clone();
    tracing::warn!(column = %column, "no fill value defined; imputation skipped");
    outcome.skipped_all_missing.push(column);
}
