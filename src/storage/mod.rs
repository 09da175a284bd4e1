//! Storage layer for the report engine
//!
//! The engine treats persistence as two capabilities: a read-only
//! `RecordStore` the strategies scan, and a `ReportStore` the job mutates
//! report rows through. Hosts back these with their real database; the
//! bundled `MemoryStore` implements both for tests and embedded use.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::types::{
    FiscalYear, Organization, OrganizationKind, PersonnelRequest, Report, RequestKind,
    ReviewStatus,
};
use crate::utils::error::Result;

/// Read-only access to the records strategies aggregate over
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Resolve a review status by ID
    async fn find_review_status(&self, id: Uuid) -> Result<Option<ReviewStatus>>;

    /// Scan request records, optionally restricted to one request kind
    async fn personnel_requests(&self, kind: Option<RequestKind>)
        -> Result<Vec<PersonnelRequest>>;

    /// All organizational units of the given level, in no guaranteed order
    async fn organizations(&self, kind: OrganizationKind) -> Result<Vec<Organization>>;

    /// The fiscal year currently in effect
    async fn current_fiscal_year(&self) -> Result<FiscalYear>;

    /// The fiscal year after the current one
    async fn next_fiscal_year(&self) -> Result<FiscalYear>;
}

/// Persistence for report rows
///
/// `update_report` replaces the whole row, so each lifecycle transition is
/// written atomically together with the fields belonging to it.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a new report row
    async fn create_report(&self, report: &Report) -> Result<()>;

    /// Load a report row by ID
    async fn find_report(&self, id: Uuid) -> Result<Option<Report>>;

    /// Replace a report row; rejects non-monotonic status transitions
    async fn update_report(&self, report: &Report) -> Result<()>;

    /// All report rows, newest first
    async fn list_reports(&self) -> Result<Vec<Report>>;
}
