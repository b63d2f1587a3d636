//! `tabular-cleaning` is a small, linear data-cleaning pipeline over an in-memory
//! [`types::DataSet`].
//!
//! Given a dataset it reports data-quality issues, normalizes column types, imputes missing
//! values, caps statistical outliers and validates the result. The primary entrypoint is
//! [`pipeline::run`].
//!
//! ## Stages
//!
//! | stage | function | report key |
//! |---|---|---|
//! | quality check | [`cleaning::check_quality`] | `initial_quality` |
//! | type standardization | [`cleaning::standardize`] | |
//! | imputation | [`cleaning::impute`] | |
//! | outlier capping | [`cleaning::cap_outliers`] | `outliers_removed` |
//! | validation | [`cleaning::validate`] | `validation` |
//!
//! No stage adds or removes rows, and column names and positions are preserved. Each column is
//! handled according to its [`types::ColumnKind`], derived from the declared
//! [`types::DataType`]:
//!
//! - [`types::DataType::Int64`], [`types::DataType::Float64`]: numeric (median, IQR capping)
//! - [`types::DataType::Utf8`]: categorical text (coercion candidate, mode)
//! - [`types::DataType::Bool`]: boolean (mode)
//! - [`types::DataType::DateTime`]: left alone after coercion
//!
//! ## Quick example: load a CSV as text and clean it
//!
//! ```no_run
//! use tabular_cleaning::ingestion::ingest_csv_as_text_from_path;
//! use tabular_cleaning::pipeline::run;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ds = ingest_csv_as_text_from_path("sales.csv")?;
//! let (cleaned, report) = run(ds)?;
//! println!("rows={}", cleaned.row_count());
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Stages log through `tracing`. The driver can also report stage timings and per-column events
//! to a [`pipeline::PipelineObserver`]:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tabular_cleaning::pipeline::{CleaningPipeline, TracingObserver};
//! use tabular_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
//! let ds = DataSet::new(schema, vec![vec![Value::Float64(1.0)], vec![Value::Null]]);
//!
//! let pipeline = CleaningPipeline::default().with_observer(Arc::new(TracingObserver));
//! let (cleaned, report) = pipeline.run(ds).unwrap();
//! assert_eq!(cleaned.rows[1][0], Value::Float64(1.0));
//! assert_eq!(report.validation.unwrap().missing_values_remaining, 0);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`cleaning`]: the individual stages and report types
//! - [`pipeline`]: the driver that sequences the stages
//! - [`ingestion`]: CSV loader
//! - [`error`]: error types

pub mod cleaning;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod types;

pub use error::{CleaningError, CleaningResult, IngestionError, IngestionResult};
