use std::fmt;
use std::time::Duration;

use crate::types::DataType;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    QualityCheck,
    Standardize,
    Impute,
    CapOutliers,
    Validate,
}

impl Stage {
    /// Every stage in the order the driver runs them.
    pub const ALL: [Self; 5] = [
        Self::QualityCheck,
        Self::Standardize,
        Self::Impute,
        Self::CapOutliers,
        Self::Validate,
    ];

    /// Short snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::QualityCheck => "quality_check",
            Self::Standardize => "standardize",
            Self::Impute => "impute",
            Self::CapOutliers => "cap_outliers",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events emitted by the pipeline driver.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    RunStarted { rows: usize, columns: usize },
    StageStarted { stage: Stage },
    StageFinished { stage: Stage, elapsed: Duration },
    ColumnConverted { column: String, to: DataType },
    ColumnImputed { column: String, filled: usize },
    ColumnSkipped { stage: Stage, column: String },
    OutliersCapped { column: String, count: usize },
    RunFinished { elapsed: Duration },
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted { rows, columns } => {
                tracing::info!(rows, columns, "cleaning pipeline started");
            }
            PipelineEvent::StageStarted { stage } => {
                tracing::debug!(stage = %stage, "stage started");
            }
            PipelineEvent::StageFinished { stage, elapsed } => {
                tracing::debug!(stage = %stage, elapsed = ?elapsed, "stage finished");
            }
            PipelineEvent::ColumnConverted { column, to } => {
                tracing::info!(column = %column, to = %to, "column converted");
            }
            PipelineEvent::ColumnImputed { column, filled } => {
                tracing::info!(column = %column, filled, "column imputed");
            }
            PipelineEvent::ColumnSkipped { stage, column } => {
                tracing::warn!(stage = %stage, column = %column, "column skipped");
            }
            PipelineEvent::OutliersCapped { column, count } => {
                tracing::info!(column = %column, count, "outliers capped");
            }
            PipelineEvent::RunFinished { elapsed } => {
                tracing::info!(elapsed = ?elapsed, "cleaning pipeline finished");
            }
        }
    }
}

/// A simple stderr logger for pipeline events.
#[derive(Debug, Default)]
pub struct StdErrPipelineObserver;

impl PipelineObserver for StdErrPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        eprintln!("[clean] {event:?}");
    }
}
