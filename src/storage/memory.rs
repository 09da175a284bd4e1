//! In-memory store
//!
//! Backs both store traits with `RwLock`-guarded maps. Used by the crate's
//! tests and by hosts that want a self-contained engine without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::types::{
    FiscalYear, Organization, OrganizationKind, PersonnelRequest, Report, RequestKind,
    ReviewStatus,
};
use crate::storage::{RecordStore, ReportStore};
use crate::utils::error::{EngineError, Result};

/// In-process implementation of `RecordStore` and `ReportStore`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    review_statuses: Arc<RwLock<HashMap<Uuid, ReviewStatus>>>,
    requests: Arc<RwLock<Vec<PersonnelRequest>>>,
    organizations: Arc<RwLock<Vec<Organization>>>,
    fiscal_years: Arc<RwLock<Option<(FiscalYear, FiscalYear)>>>,
    reports: Arc<RwLock<HashMap<Uuid, Report>>>,
    report_order: Arc<RwLock<Vec<Uuid>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a review status
    pub async fn insert_review_status(&self, status: ReviewStatus) {
        self.review_statuses.write().await.insert(status.id, status);
    }

    /// Seed a request record
    pub async fn insert_request(&self, request: PersonnelRequest) {
        self.requests.write().await.push(request);
    }

    /// Seed an organizational unit
    pub async fn insert_organization(&self, organization: Organization) {
        self.organizations.write().await.push(organization);
    }

    /// Seed the current and next fiscal-year markers
    pub async fn set_fiscal_years(&self, current: FiscalYear, next: FiscalYear) {
        *self.fiscal_years.write().await = Some((current, next));
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_review_status(&self, id: Uuid) -> Result<Option<ReviewStatus>> {
        Ok(self.review_statuses.read().await.get(&id).cloned())
    }

    async fn personnel_requests(
        &self,
        kind: Option<RequestKind>,
    ) -> Result<Vec<PersonnelRequest>> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .cloned()
            .collect())
    }

    async fn organizations(&self, kind: OrganizationKind) -> Result<Vec<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .iter()
            .filter(|o| o.kind == kind)
            .cloned()
            .collect())
    }

    async fn current_fiscal_year(&self) -> Result<FiscalYear> {
        let years = self.fiscal_years.read().await;
        years
            .as_ref()
            .map(|(current, _)| current.clone())
            .ok_or_else(|| EngineError::data_access("fiscal years not configured"))
    }

    async fn next_fiscal_year(&self) -> Result<FiscalYear> {
        let years = self.fiscal_years.read().await;
        years
            .as_ref()
            .map(|(_, next)| next.clone())
            .ok_or_else(|| EngineError::data_access("fiscal years not configured"))
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn create_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.write().await;
        if reports.contains_key(&report.id) {
            return Err(EngineError::data_access(format!(
                "report {} already exists",
                report.id
            )));
        }
        reports.insert(report.id, report.clone());
        self.report_order.write().await.push(report.id);
        Ok(())
    }

    async fn find_report(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self.reports.read().await.get(&id).cloned())
    }

    async fn update_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.write().await;
        let existing = reports
            .get(&report.id)
            .ok_or_else(|| EngineError::not_found(format!("report {}", report.id)))?;

        let same_status = existing.status == report.status;
        if !same_status && !existing.status.can_transition_to(report.status) {
            return Err(EngineError::InvalidTransition {
                from: existing.status.to_string(),
                to: report.status.to_string(),
            });
        }

        reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<Report>> {
        let reports = self.reports.read().await;
        let order = self.report_order.read().await;
        Ok(order
            .iter()
            .rev()
            .filter_map(|id| reports.get(id).cloned())
            .collect())
    }
}
