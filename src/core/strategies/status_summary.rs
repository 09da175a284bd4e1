//! Review status summary
//!
//! Counts requests per review status, optionally restricted to one request
//! kind. A small second strategy that keeps the registry honest about
//! polymorphism.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::core::aggregate::Accumulator;
use crate::core::strategies::ReportStrategy;
use crate::core::types::{ReportFormat, RequestKind, ReviewStatus};
use crate::storage::RecordStore;
use crate::utils::error::{EngineError, Result};

/// One review status' row in the summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCountRow {
    /// Status machine code
    pub code: String,
    /// Status display name
    pub status: String,
    /// Number of matching requests
    pub count: i64,
}

/// Aggregated result handed to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummaryData {
    /// One row per review status that has requests, ascending by code
    pub summary_data: Vec<StatusCountRow>,
    /// The request kind the counts were restricted to, if any
    pub kind: Option<RequestKind>,
}

/// A count of requests per review status
#[derive(Debug, Clone)]
pub struct ReviewStatusSummaryReport {
    kind: Option<serde_json::Value>,
}

impl ReviewStatusSummaryReport {
    /// Registry tag for this report
    pub const NAME: &'static str = "review_status_summary";

    /// Build an instance from a report row's parameter bag
    pub fn from_parameters(parameters: &serde_json::Value) -> Self {
        Self {
            kind: parameters.get("kind").cloned(),
        }
    }

    fn parsed_kind(&self) -> std::result::Result<Option<RequestKind>, String> {
        match &self.kind {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value::<RequestKind>(value.clone())
                .map(Some)
                .map_err(|_| format!("Unknown request kind: {value}")),
        }
    }
}

#[async_trait]
impl ReportStrategy for ReviewStatusSummaryReport {
    fn description(&self) -> &'static str {
        "A count of requests in each review status"
    }

    fn supported_formats(&self) -> &'static [ReportFormat] {
        &[ReportFormat::Csv, ReportFormat::Html]
    }

    fn template_id(&self) -> &'static str {
        Self::NAME
    }

    fn validate_parameters(&self) -> std::result::Result<(), String> {
        self.parsed_kind().map(|_| ())
    }

    async fn query(&self, store: &dyn RecordStore) -> Result<serde_json::Value> {
        let kind = self
            .parsed_kind()
            .map_err(EngineError::validation)?;

        let mut counts: Accumulator<Uuid> = Accumulator::new();
        let requests = store.personnel_requests(kind).await?;
        debug!(count = requests.len(), "scanning requests for status counts");
        for request in &requests {
            counts.add(request.review_status_id, 1);
        }

        let mut statuses: HashMap<Uuid, ReviewStatus> = HashMap::new();
        for (id, _) in counts.iter() {
            let status = store.find_review_status(*id).await?.ok_or_else(|| {
                EngineError::data_access(format!("review status {id} does not exist"))
            })?;
            statuses.insert(*id, status);
        }

        let mut summary_data: Vec<StatusCountRow> = counts
            .iter()
            .map(|(id, count)| {
                let status = &statuses[id];
                StatusCountRow {
                    code: status.code.clone(),
                    status: status.name.clone(),
                    count: *count,
                }
            })
            .collect();
        summary_data.sort_by(|a, b| a.code.cmp(&b.code));

        let data = StatusSummaryData { summary_data, kind };
        Ok(serde_json::to_value(data)?)
    }
}
