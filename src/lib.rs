//! # personnel-reports
//!
//! Report execution and aggregation engine for a personnel request tracking
//! system (contractor, labor, and staff hires inside an organizational
//! hierarchy).
//!
//! ## Features
//!
//! - **Pluggable strategies**: each report type validates its own
//!   parameters, scans records, and aggregates totals behind one contract
//! - **Explicit registry**: report names resolve to strategy factories;
//!   unknown names fail fast
//! - **Status lifecycle**: report rows move `pending -> running ->
//!   {completed | error}` and never leave a terminal state
//! - **Record-then-surface failures**: a failed run is persisted as `error`
//!   before the fault reaches job infrastructure, so no report is ever
//!   observed stuck in `running`
//! - **Deterministic output**: totals are integer cents, rows are ordered by
//!   department code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use personnel_reports::{
//!     Report, ReportFormat, ReportJob, StrategyRegistry, TemplateRenderer,
//! };
//! use personnel_reports::storage::{MemoryStore, ReportStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let job = ReportJob::new(
//!         Arc::new(StrategyRegistry::default()),
//!         store.clone(),
//!         store.clone(),
//!         Arc::new(TemplateRenderer::new()),
//!     );
//!
//!     let report = Report::new(
//!         "labor_requests_cost_summary",
//!         serde_json::json!({ "review_status_ids": [] }),
//!         ReportFormat::Csv,
//!     );
//!     store.create_report(&report).await?;
//!
//!     let summary = job.execute(vec![report]).await;
//!     println!("completed: {}, invalid: {}", summary.completed.len(), summary.invalid.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use crate::config::EngineConfig;
pub use crate::core::aggregate::Accumulator;
pub use crate::core::rendering::{RenderContext, ReportRenderer, TemplateRenderer};
pub use crate::core::report_job::{ExecutionSummary, ReportJob};
pub use crate::core::strategies::{ReportStrategy, StrategyRegistry};
pub use crate::core::types::{Report, ReportFormat, ReportStatus};
pub use crate::utils::error::{EngineError, Result};
