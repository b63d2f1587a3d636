//! Column statistics shared by the cleaning stages.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;

use crate::types::{DataSet, Value};

/// Linear-interpolation quantile over an ascending slice.
///
/// Uses position `q * (n - 1)` and interpolates between the closest ranks.
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let lo_v = *sorted.get(lo)?;
    let frac = pos - lo as f64;
    if lo == hi || frac == 0.0 {
        return Some(lo_v);
    }
    let hi_v = *sorted.get(hi)?;
    Some(lo_v + (hi_v - lo_v) * frac)
}

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Median of `values`, or `None` if empty.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Exact median of integer values, if it is itself an integer.
///
/// Returns `None` for an empty slice or when the two middle values have an odd sum.
pub fn integral_median(values: &[i64]) -> Option<i64> {
    let mut s = values.to_vec();
    s.sort_unstable();
    let n = s.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        return Some(s[n / 2]);
    }
    let sum = i128::from(s[n / 2 - 1]) + i128::from(s[n / 2]);
    if sum % 2 != 0 {
        return None;
    }
    i64::try_from(sum / 2).ok()
}

/// Hashable, ordered view of a [`Value`] used for equality-based statistics.
///
/// Missing values (null or NaN) collapse to one key, and `-0.0` equals `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum ValueKey<'a> {
    Missing,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
    DateTime(NaiveDateTime),
}

impl<'a> ValueKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Float64(v) if v.is_nan() => Self::Missing,
            Value::Float64(v) if *v == 0.0 => Self::Float(0.0f64.to_bits()),
            Value::Float64(v) => Self::Float(v.to_bits()),
            Value::Int64(v) => Self::Int(*v),
            Value::Bool(v) => Self::Bool(*v),
            Value::Utf8(s) => Self::Str(s),
            Value::DateTime(dt) => Self::DateTime(*dt),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Int(v) => Value::Int64(*v),
            Self::Float(bits) => Value::Float64(f64::from_bits(*bits)),
            Self::Bool(v) => Value::Bool(*v),
            Self::Str(s) => Value::Utf8((*s).to_owned()),
            Self::DateTime(dt) => Value::DateTime(*dt),
        }
    }
}

/// Most frequent non-missing value.
///
/// Ties resolve to the smallest tied value, so the result is stable across runs.
/// Returns `None` when every value is missing.
pub fn mode<'a, I>(values: I) -> Option<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut counts: BTreeMap<ValueKey<'a>, usize> = BTreeMap::new();
    for value in values {
        if value.is_missing() {
            continue;
        }
        *counts.entry(ValueKey::of(value)).or_insert(0) += 1;
    }

    let mut best: Option<(&ValueKey<'a>, usize)> = None;
    for (key, &count) in &counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key.to_value())
}

/// Number of rows identical (across all columns) to an earlier row.
///
/// The first occurrence of a row is not counted.
pub fn duplicate_row_count(dataset: &DataSet) -> usize {
    let mut seen: HashSet<Vec<ValueKey<'_>>> = HashSet::with_capacity(dataset.row_count());
    dataset
        .rows
        .iter()
        .filter(|row| !seen.insert(row.iter().map(ValueKey::of).collect()))
        .count()
}

/// Total number of missing cells across all columns.
pub fn total_missing(dataset: &DataSet) -> usize {
    dataset
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|v| v.is_missing())
        .count()
}
