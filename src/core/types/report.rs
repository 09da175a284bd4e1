//! Report entity and status lifecycle
//!
//! A `Report` row describes one report run: which strategy to execute, its
//! parameters, the requested output format, and the run's lifecycle state.
//! Rows move `Pending -> Running -> {Completed | Error}` and never leave a
//! terminal state; a retry is always a new row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{EngineError, Result};

/// Lifecycle state of a report run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Created, not yet picked up by the job
    Pending,
    /// The job owns this row and is executing the strategy
    Running,
    /// Output produced and persisted
    Completed,
    /// Validation failed (with message) or execution failed (without)
    Error,
}

impl ReportStatus {
    /// Whether no further transitions may occur
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Whether moving to `next` is a legal lifecycle step
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, ReportStatus::Running)
                | (Self::Running, ReportStatus::Completed)
                | (Self::Running, ReportStatus::Error)
        )
    }

    /// Lowercase label, matching the persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format a report run is requested in
///
/// Strategies declare the subset of formats they can produce; the job rejects
/// a request outside that subset before rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Spreadsheet-style tabular output
    Csv,
    /// Standalone HTML document
    Html,
}

impl ReportFormat {
    /// File extension / template suffix for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Row ID
    pub id: Uuid,
    /// Strategy tag, resolved against the registry at execution time
    pub name: String,
    /// Strategy-specific parameter bag
    pub parameters: serde_json::Value,
    /// Requested output format
    pub format: ReportFormat,
    /// Lifecycle state
    pub status: ReportStatus,
    /// Rendered output, present only once completed
    pub output: Option<String>,
    /// Human-readable failure detail, present only on validation failures
    pub status_message: Option<String>,
    /// Creation timestamp, also used by strategies as the generation-time
    /// reference for output labelling
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Create a new pending report run
    pub fn new(
        name: impl Into<String>,
        parameters: serde_json::Value,
        format: ReportFormat,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parameters,
            format,
            status: ReportStatus::Pending,
            output: None,
            status_message: None,
            created_at: Utc::now(),
        }
    }

    fn transition(&mut self, next: ReportStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Move the run to `Running`
    pub fn mark_running(&mut self) -> Result<()> {
        self.transition(ReportStatus::Running)
    }

    /// Move the run to `Completed`, recording its output
    pub fn mark_completed(&mut self, output: String) -> Result<()> {
        self.transition(ReportStatus::Completed)?;
        self.output = Some(output);
        self.status_message = None;
        Ok(())
    }

    /// Move the run to `Error`
    ///
    /// A message is set only for expected validation failures; unexpected
    /// execution failures leave it empty, which distinguishes the two error
    /// paths for readers of the row.
    pub fn mark_error(&mut self, message: Option<String>) -> Result<()> {
        self.transition(ReportStatus::Error)?;
        self.status_message = message;
        self.output = None;
        Ok(())
    }
}
