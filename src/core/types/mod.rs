//! Core type definitions
//!
//! Contains the persisted report entity and the read-only record model the
//! strategies query.

pub mod records;
pub mod report;

pub use records::{
    EmployeeType, FiscalYear, Organization, OrganizationKind, PersonnelRequest, RequestKind,
    ReviewStatus,
};
pub use report::{Report, ReportFormat, ReportStatus};
