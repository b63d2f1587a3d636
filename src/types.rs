//! Core data model types for cleaning.
//!
//! The pipeline operates on an in-memory [`DataSet`] described by a [`Schema`] (a list of typed
//! [`Field`]s). Cells are typed [`Value`]s; [`Value::Null`] is the single missing-value marker.

use std::fmt;
use std::mem::size_of;

use chrono::NaiveDateTime;

use crate::error::{CleaningError, CleaningResult};

static NULL: Value = Value::Null;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string. This is the generic/text kind that type standardization considers.
    Utf8,
    /// Timestamp without timezone.
    DateTime,
}

impl DataType {
    /// The cleaning kind this type belongs to.
    pub fn kind(self) -> ColumnKind {
        match self {
            Self::Int64 | Self::Float64 => ColumnKind::Numeric,
            Self::DateTime => ColumnKind::DateTime,
            Self::Bool => ColumnKind::Boolean,
            Self::Utf8 => ColumnKind::Categorical,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
            Self::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// How a column is treated by the cleaning stages.
///
/// Derived once from the declared [`DataType`] instead of probing values at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Integer or floating point values: median imputation and IQR capping.
    Numeric,
    /// Parsed timestamps: left alone by imputation and capping.
    DateTime,
    /// Booleans: mode imputation.
    Boolean,
    /// Free text / categories: candidates for type standardization, mode imputation.
    Categorical,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Cleaning kind of this field.
    pub fn kind(&self) -> ColumnKind {
        self.data_type.kind()
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Indexes of all fields of the given kind, in schema order.
    pub fn indexes_of_kind(&self, kind: ColumnKind) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind() == kind)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
}

impl Value {
    /// `true` for [`Value::Null`] and for a NaN float.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it is a non-missing number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// The data type this value belongs to, or `None` for [`Value::Null`].
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int64(_) => Some(DataType::Int64),
            Self::Float64(_) => Some(DataType::Float64),
            Self::Bool(_) => Some(DataType::Bool),
            Self::Utf8(_) => Some(DataType::Utf8),
            Self::DateTime(_) => Some(DataType::DateTime),
        }
    }

    fn heap_bytes(&self) -> usize {
        match self {
            Self::Utf8(s) => s.len(),
            _ => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Cleaning
/// stages mutate a dataset in place and never add or remove rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of column `idx`, one per row.
    ///
    /// Rows shorter than `idx` yield [`Value::Null`].
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(idx).unwrap_or(&NULL))
    }

    /// Non-missing numeric values of column `idx`, in row order.
    pub fn numeric_values(&self, idx: usize) -> Vec<f64> {
        self.column(idx).filter_map(Value::as_f64).collect()
    }

    /// Number of missing values in column `idx`.
    pub fn missing_count(&self, idx: usize) -> usize {
        self.column(idx).filter(|v| v.is_missing()).count()
    }

    /// Apply `f` to the value of column `idx` in every row.
    pub fn update_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for row in &mut self.rows {
            if let Some(value) = row.get_mut(idx) {
                f(value);
            }
        }
    }

    /// Widen an `Int64` column to `Float64`, converting every integer cell.
    ///
    /// No-op for any other column type.
    pub fn promote_to_float(&mut self, idx: usize) {
        let Some(field) = self.schema.fields.get_mut(idx) else {
            return;
        };
        if field.data_type != DataType::Int64 {
            return;
        }
        field.data_type = DataType::Float64;
        self.update_column(idx, |value| {
            if let Value::Int64(v) = value {
                *value = Value::Float64(*v as f64);
            }
        });
    }

    /// Approximate in-memory footprint in bytes.
    ///
    /// Counts one [`Value`] slot per cell, string payload bytes, and one `Vec` header per row.
    pub fn estimated_memory_bytes(&self) -> usize {
        self.rows
            .iter()
            .map(|row| {
                size_of::<Vec<Value>>()
                    + row.len() * size_of::<Value>()
                    + row.iter().map(Value::heap_bytes).sum::<usize>()
            })
            .sum()
    }

    /// Check that the dataset is table-shaped and that every value matches its field type.
    ///
    /// # Errors
    ///
    /// - [`CleaningError::DuplicateColumn`] if two fields share a name.
    /// - [`CleaningError::RowArity`] if a row has a different length than the schema.
    /// - [`CleaningError::TypeMismatch`] if a non-null value does not match its column type.
    pub fn check_shape(&self) -> CleaningResult<()> {
        for (i, field) in self.schema.fields.iter().enumerate() {
            if self.schema.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(CleaningError::DuplicateColumn {
                    column: field.name.clone(),
                });
            }
        }

        let expected = self.column_count();
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(CleaningError::RowArity {
                    row: row_idx,
                    expected,
                    found: row.len(),
                });
            }
            for (field, value) in self.schema.fields.iter().zip(row) {
                match value.data_type() {
                    None => {}
                    Some(dt) if dt == field.data_type => {}
                    Some(dt) => {
                        return Err(CleaningError::TypeMismatch {
                            row: row_idx,
                            column: field.name.clone(),
                            expected: field.data_type,
                            found: dt,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
