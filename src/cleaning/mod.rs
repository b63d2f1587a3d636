//! Cleaning stages.
//!
//! Each stage is a stateless function over a [`crate::types::DataSet`]:
//!
//! - [`check_quality()`]: missing values, duplicates, row count, memory footprint
//! - [`standardize()`]: coerce text columns to datetime or numeric when every value parses
//! - [`impute()`]: median for numeric columns, mode for categorical/boolean columns
//! - [`cap_outliers()`]: clip numeric columns to `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`
//! - [`validate()`]: re-check the cleaned dataset into the cumulative report
//!
//! Most callers want [`crate::pipeline::run`], which applies them in that order.
//!
//! ## Example: running stages by hand
//!
//! ```rust
//! use tabular_cleaning::cleaning::{cap_outliers, check_quality, impute};
//! use tabular_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
//! let mut ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(1.0)],
//!         vec![Value::Float64(2.0)],
//!         vec![Value::Null],
//!         vec![Value::Float64(3.0)],
//!         vec![Value::Float64(4.0)],
//!         vec![Value::Float64(100.0)],
//!     ],
//! );
//!
//! assert_eq!(check_quality(&ds).missing_values["x"], 1);
//!
//! impute(&mut ds);
//! assert_eq!(ds.rows[2][0], Value::Float64(3.0));
//!
//! let outliers = cap_outliers(&mut ds);
//! assert_eq!(outliers["x"], 1);
//! ```

pub mod impute;
pub mod outliers;
pub mod quality;
pub mod report;
pub mod standardize;
pub mod stats;
pub mod validate;

pub use impute::{impute, ImputeOutcome, Imputation};
pub use outliers::{cap_outliers, iqr_bounds, IqrBounds, IQR_MULTIPLIER};
pub use quality::check_quality;
pub use report::{CleaningReport, OutlierCounts, QualityReport, ValidationReport};
pub use standardize::{standardize, TypeConversion};
pub use validate::validate;
