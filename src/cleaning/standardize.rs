//! Type standardization for text columns.
//!
//! Every [`DataType::Utf8`] column is run through an ordered list of parsers; the first parser
//! that accepts *every* non-null value wins and the column is rewritten with the parsed values.
//! If no parser accepts the whole column it stays text. Conversion is all-or-none: a single
//! unparseable value leaves the column untouched.
//!
//! Parsers, in order:
//!
//! 1. datetime / date (see [`parse_datetime`])
//! 2. numeric after stripping `$` and `,` (see [`parse_numeric`])

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::{ColumnKind, DataSet, DataType, Value};

/// A column that was converted from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConversion {
    /// Column name.
    pub column: String,
    /// New column type.
    pub to: DataType,
}

type Parser = fn(&str) -> Option<Value>;

const PARSERS: [(DataType, Parser); 2] = [
    (DataType::DateTime, parse_datetime_value),
    (DataType::Float64, parse_numeric_value),
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
];

// No separator-free layouts such as `%Y%m%d`: integer text like `20240115` must stay numeric.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a timestamp or a date (date-only values become midnight).
///
/// Accepts RFC 3339 (offset dropped after converting to UTC), ISO-8601 with `T` or a space,
/// slash-separated US/European layouts, and month-name layouts.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a number after stripping currency symbols (`$`) and thousands separators (`,`).
///
/// Non-finite results (`inf`, `NaN`) are rejected.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_datetime_value(raw: &str) -> Option<Value> {
    parse_datetime(raw).map(Value::DateTime)
}

fn parse_numeric_value(raw: &str) -> Option<Value> {
    parse_numeric(raw).map(Value::Float64)
}

/// Try `parser` on every value of column `idx`.
///
/// Returns `None` if any non-null value fails, or if the column has no non-null values.
fn convert_column(dataset: &DataSet, idx: usize, parser: Parser) -> Option<Vec<Value>> {
    let mut parsed_any = false;
    let mut out = Vec::with_capacity(dataset.row_count());
    for value in dataset.column(idx) {
        match value {
            Value::Null => out.push(Value::Null),
            Value::Utf8(s) => {
                out.push(parser(s)?);
                parsed_any = true;
            }
            _ => return None,
        }
    }
    parsed_any.then_some(out)
}

/// Coerce text columns to datetime or numeric where every value parses.
///
/// Non-text columns pass through untouched. Parse failures never surface as errors; a column
/// that no parser fully accepts is kept as categorical text.
pub fn standardize(dataset: &mut DataSet) -> Vec<TypeConversion> {
    let mut conversions = Vec::new();

    for idx in dataset.schema.indexes_of_kind(ColumnKind::Categorical) {
        let converted = PARSERS.iter().find_map(|(to, parser)| {
            convert_column(dataset, idx, *parser).map(|values| (*to, values))
        });

        let name = dataset.schema.fields[idx].name.clone();
        match converted {
            Some((to, values)) => {
                for (row, value) in dataset.rows.iter_mut().zip(values) {
                    if let Some(slot) = row.get_mut(idx) {
                        *slot = value;
                    }
                }
                dataset.schema.fields[idx].data_type = to;
                tracing::debug!(column = %name, to = %to, "converted text column");
                conversions.push(TypeConversion { column: name, to });
            }
            None => tracing::debug!(column = %name, "kept as categorical text"),
        }
    }

    conversions
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{parse_datetime, parse_numeric, standardize, TypeConversion};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn text(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn parse_numeric_strips_currency_and_separators() {
        assert_eq!(parse_numeric("$1,200"), Some(1200.0));
        assert_eq!(parse_numeric(" 3.5 "), Some(3.5));
        assert_eq!(parse_numeric("-$1,000.25"), Some(-1000.25));
        assert_eq!(parse_numeric("$;bad"), None);
        assert_eq!(parse_numeric("$"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn parse_datetime_accepts_common_layouts() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime("15-Jan-2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(
            parse_datetime("2024-01-15T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            parse_datetime("2024-01-15T10:30:00+02:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(8, 30, 0)
        );
        assert_eq!(parse_datetime("20240115"), None);
        assert_eq!(parse_datetime("1200"), None);
        assert_eq!(parse_datetime("red"), None);
    }

    fn mixed_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("joined", DataType::Utf8),
            Field::new("price", DataType::Utf8),
            Field::new("city", DataType::Utf8),
            Field::new("age", DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![text("2024-01-15"), text("$1,200"), text("Oslo"), Value::Int64(30)],
                vec![Value::Null, text("15.5"), text("Rome"), Value::Int64(40)],
                vec![text("2023-12-31"), text("$7"), Value::Null, Value::Null],
            ],
        )
    }

    #[test]
    fn converts_dates_and_numbers_and_keeps_text() {
        let mut ds = mixed_dataset();
        let notes = standardize(&mut ds);

        assert_eq!(
            notes,
            vec![
                TypeConversion {
                    column: "joined".to_string(),
                    to: DataType::DateTime
                },
                TypeConversion {
                    column: "price".to_string(),
                    to: DataType::Float64
                },
            ]
        );
        assert_eq!(ds.schema.fields[0].data_type, DataType::DateTime);
        assert_eq!(ds.rows[0][0], Value::DateTime(ymd(2024, 1, 15)));
        assert_eq!(ds.rows[1][0], Value::Null);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
        assert_eq!(ds.rows[0][1], Value::Float64(1200.0));
        assert_eq!(ds.rows[2][1], Value::Float64(7.0));
        assert_eq!(ds.schema.fields[2].data_type, DataType::Utf8);
        assert_eq!(ds.schema.fields[3].data_type, DataType::Int64);
        assert!(ds.check_shape().is_ok());
    }

    #[test]
    fn one_bad_value_leaves_column_fully_unchanged() {
        let schema = Schema::new(vec![Field::new("price", DataType::Utf8)]);
        let mut ds = DataSet::new(
            schema,
            vec![vec![text("$1,200")], vec![text("$;bad")], vec![text("$3")]],
        );
        let before = ds.clone();

        let notes = standardize(&mut ds);

        assert!(notes.is_empty());
        assert_eq!(ds, before);
    }

    #[test]
    fn all_null_text_column_is_left_alone() {
        let schema = Schema::new(vec![Field::new("notes", DataType::Utf8)]);
        let mut ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert!(standardize(&mut ds).is_empty());
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    }

    #[test]
    fn bool_and_numeric_columns_pass_through() {
        let schema = Schema::new(vec![
            Field::new("flag", DataType::Bool),
            Field::new("x", DataType::Float64),
        ]);
        let mut ds = DataSet::new(
            schema,
            vec![vec![Value::Bool(true), Value::Float64(1.0)]],
        );
        let before = ds.clone();
        assert!(standardize(&mut ds).is_empty());
        assert_eq!(ds, before);
    }

    #[test]
    fn short_rows_are_skipped_when_writing_converted_values() {
        let schema = Schema::new(vec![
            Field::new("city", DataType::Utf8),
            Field::new("price", DataType::Utf8),
        ]);
        let mut ds = DataSet::new(
            schema,
            vec![
                vec![text("Oslo"), text("$5")],
                vec![text("Rome")],
                vec![text("Bern"), text("7")],
            ],
        );

        let notes = standardize(&mut ds);

        assert_eq!(notes.len(), 1);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
        assert_eq!(ds.rows[0][1], Value::Float64(5.0));
        assert_eq!(ds.rows[1], vec![text("Rome")]);
        assert_eq!(ds.rows[2][1], Value::Float64(7.0));
    }
}
