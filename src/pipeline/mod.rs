//! Pipeline driver: runs the cleaning stages in a fixed order.
//!
//! 1. validate the dataset's shape (malformed input is the only fatal error)
//! 2. record the original row count
//! 3. [`check_quality`] → `report.initial_quality`
//! 4. [`standardize`]
//! 5. [`impute`]
//! 6. [`cap_outliers`] → `report.outliers_removed`
//! 7. [`validate`] → `report.validation`
//!
//! There is no branching and no retry. The dataset is taken by value, mutated in place and
//! handed back with the report.
//!
//! ## Example
//!
//! ```rust
//! use tabular_cleaning::pipeline::run;
//! use tabular_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! # fn main() -> Result<(), tabular_cleaning::CleaningError> {
//! let schema = Schema::new(vec![
//!     Field::new("age", DataType::Int64),
//!     Field::new("price", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(30), Value::Utf8("$1,200".to_string())],
//!         vec![Value::Null, Value::Utf8("$950".to_string())],
//!         vec![Value::Int64(50), Value::Utf8("$1,010".to_string())],
//!     ],
//! );
//!
//! let (cleaned, report) = run(ds)?;
//! assert_eq!(cleaned.rows[1][0], Value::Int64(40));
//! assert_eq!(cleaned.rows[0][1], Value::Float64(1200.0));
//! assert_eq!(report.initial_quality.unwrap().missing_values["age"], 1);
//! # Ok(())
//! # }
//! ```

mod observer;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::cleaning::{cap_outliers, check_quality, impute, standardize, validate, CleaningReport};
use crate::error::CleaningResult;
use crate::types::DataSet;

pub use observer::{PipelineEvent, PipelineObserver, Stage, StdErrPipelineObserver, TracingObserver};

/// Options for [`CleaningPipeline`].
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct PipelineOptions {
    /// Optional observer for stage and column events.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// The cleaning pipeline driver.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    opts: PipelineOptions,
}

impl CleaningPipeline {
    /// Create a pipeline with the given options.
    pub fn new(opts: PipelineOptions) -> Self {
        Self { opts }
    }

    /// Attach an observer for pipeline events.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.opts.observer = Some(observer);
        self
    }

    /// Run every stage over `dataset` and return it together with the cumulative report.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset is malformed (see [`DataSet::check_shape`]). Nothing
    /// else in the pipeline fails.
    pub fn run(&self, mut dataset: DataSet) -> CleaningResult<(DataSet, CleaningReport)> {
        dataset.check_shape()?;

        let start = Instant::now();
        let original_rows = dataset.row_count();
        self.emit(PipelineEvent::RunStarted {
            rows: original_rows,
            columns: dataset.column_count(),
        });

        let mut report = CleaningReport::default();

        let initial = self.stage(Stage::QualityCheck, || check_quality(&dataset));
        report.initial_quality = Some(initial);

        let conversions = self.stage(Stage::Standardize, || standardize(&mut dataset));
        for c in conversions {
            self.emit(PipelineEvent::ColumnConverted {
                column: c.column,
                to: c.to,
            });
        }

        let imputed = self.stage(Stage::Impute, || impute(&mut dataset));
        for i in imputed.imputed {
            self.emit(PipelineEvent::ColumnImputed {
                column: i.column,
                filled: i.filled,
            });
        }
        for column in imputed.skipped_all_missing {
            self.emit(PipelineEvent::ColumnSkipped {
                stage: Stage::Impute,
                column,
            });
        }

        let outliers = self.stage(Stage::CapOutliers, || cap_outliers(&mut dataset));
        for (column, &count) in &outliers {
            self.emit(PipelineEvent::OutliersCapped {
                column: column.clone(),
                count,
            });
        }
        report.outliers_removed = Some(outliers);

        let report = self.stage(Stage::Validate, || validate(&dataset, original_rows, report));

        self.emit(PipelineEvent::RunFinished {
            elapsed: start.elapsed(),
        });
        Ok((dataset, report))
    }

    fn stage<T>(&self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        self.emit(PipelineEvent::StageStarted { stage });
        let out = f();
        self.emit(PipelineEvent::StageFinished {
            stage,
            elapsed: start.elapsed(),
        });
        out
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(obs) = &self.opts.observer {
            obs.on_event(&event);
        }
    }
}

/// Run the pipeline with default options.
///
/// # Errors
///
/// See [`CleaningPipeline::run`].
pub fn run(dataset: DataSet) -> CleaningResult<(DataSet, CleaningReport)> {
    CleaningPipeline::default().run(dataset)
}
