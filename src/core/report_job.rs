//! Report execution job
//!
//! Drives a batch of report rows through their lifecycle: resolve the
//! strategy, validate, query, render, persist. Failures follow a
//! record-then-surface pattern: the row flips to `error` before anything
//! propagates, so readers never find a report stuck in `running`.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::core::rendering::{RenderContext, ReportRenderer};
use crate::core::strategies::StrategyRegistry;
use crate::core::types::Report;
use crate::storage::{RecordStore, ReportStore};
use crate::utils::error::{EngineError, Result};

/// How one report run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportOutcome {
    /// Output rendered and persisted
    Completed,
    /// Parameters (or the requested format) were rejected; this is an
    /// expected terminal outcome, not a fault
    Invalid,
}

/// What happened to each report of a batch
///
/// Execution failures are collected here instead of aborting the batch, so
/// sibling reports still run while upstream retry/alerting infrastructure
/// gets the full error values.
#[derive(Debug, Default)]
pub struct ExecutionSummary {
    /// Reports that reached `completed`
    pub completed: Vec<Uuid>,
    /// Reports rejected by parameter/format validation (terminal `error`
    /// with a message; not propagated)
    pub invalid: Vec<Uuid>,
    /// Reports that failed during resolution, query, or rendering
    pub failed: Vec<(Uuid, EngineError)>,
}

impl ExecutionSummary {
    /// Whether every report either completed or was rejected by validation
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of reports the batch touched
    pub fn total(&self) -> usize {
        self.completed.len() + self.invalid.len() + self.failed.len()
    }
}

/// Batch report executor
pub struct ReportJob {
    registry: Arc<StrategyRegistry>,
    records: Arc<dyn RecordStore>,
    reports: Arc<dyn ReportStore>,
    renderer: Arc<dyn ReportRenderer>,
    halt_on_failure: bool,
}

impl ReportJob {
    /// Create a job over the given collaborators
    pub fn new(
        registry: Arc<StrategyRegistry>,
        records: Arc<dyn RecordStore>,
        reports: Arc<dyn ReportStore>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            registry,
            records,
            reports,
            renderer,
            halt_on_failure: false,
        }
    }

    /// Apply job settings from configuration
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.halt_on_failure = config.job.halt_on_failure;
        self
    }

    /// Execute a batch of report rows sequentially.
    ///
    /// Rows must already exist in the report store. Each report is processed
    /// independently; by default a failure is recorded in the summary and
    /// the batch continues (`halt_on_failure` stops at the first fault).
    pub async fn execute(&self, reports: Vec<Report>) -> ExecutionSummary {
        info!(batch = reports.len(), "executing report batch");
        let mut summary = ExecutionSummary::default();

        for mut report in reports {
            let id = report.id;
            match self.run_report(&mut report).await {
                Ok(ReportOutcome::Completed) => {
                    info!(report = %id, name = %report.name, "report completed");
                    summary.completed.push(id);
                }
                Ok(ReportOutcome::Invalid) => {
                    warn!(
                        report = %id,
                        name = %report.name,
                        message = report.status_message.as_deref().unwrap_or(""),
                        "report parameters rejected"
                    );
                    summary.invalid.push(id);
                }
                Err(e) => {
                    error!(report = %id, name = %report.name, "report failed: {e}");
                    summary.failed.push((id, e));
                    if self.halt_on_failure {
                        warn!("halting batch after failure");
                        break;
                    }
                }
            }
        }

        summary
    }

    /// Run a single report through its lifecycle
    async fn run_report(&self, report: &mut Report) -> Result<ReportOutcome> {
        report.mark_running()?;
        self.reports.update_report(report).await?;
        debug!(report = %report.id, "report running");

        match self.run_to_terminal(report).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Persist the error state before surfacing the failure. If
                // even that write fails we still propagate the original
                // error; the second failure is only logged.
                if !report.status.is_terminal() {
                    if let Err(persist_err) = self.record_error(report, None).await {
                        error!(
                            report = %report.id,
                            "failed to persist error status: {persist_err}"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    async fn run_to_terminal(&self, report: &mut Report) -> Result<ReportOutcome> {
        let strategy = self.registry.resolve(&report.name, &report.parameters)?;

        if !strategy.supported_formats().contains(&report.format) {
            let message = format!("Format '{}' is not available for this report", report.format);
            self.record_error(report, Some(message)).await?;
            return Ok(ReportOutcome::Invalid);
        }

        if let Err(message) = strategy.validate_parameters() {
            self.record_error(report, Some(message)).await?;
            return Ok(ReportOutcome::Invalid);
        }

        let data = strategy.query(self.records.as_ref()).await?;

        let context = RenderContext {
            strategy_name: report.name.clone(),
            description: strategy.description().to_string(),
            data,
            created_at: report.created_at,
        };
        let output = self
            .renderer
            .render(strategy.template_id(), report.format, &context)
            .await?;

        report.mark_completed(output)?;
        self.reports.update_report(report).await?;
        Ok(ReportOutcome::Completed)
    }

    async fn record_error(&self, report: &mut Report, message: Option<String>) -> Result<()> {
        report.mark_error(message)?;
        self.reports.update_report(report).await
    }
}
