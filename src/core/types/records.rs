//! Read-only record model
//!
//! The request hierarchy, organizational units, review statuses, and fiscal
//! years live outside this engine; strategies only scan them. Monetary
//! amounts are integer cents so totals stay exact and reproducible.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which request flavor a record belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Contractor,
    Labor,
    Staff,
}

/// Employee classification on a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EmployeeType {
    #[serde(rename = "Contingent 1")]
    Contingent1,
    #[serde(rename = "Faculty Hourly")]
    FacultyHourly,
    #[serde(rename = "Student")]
    Student,
    #[serde(rename = "Exempt")]
    Exempt,
    #[serde(rename = "Faculty")]
    Faculty,
    #[serde(rename = "Graduate Assistant")]
    GraduateAssistant,
    #[serde(rename = "Non-exempt")]
    NonExempt,
    #[serde(rename = "Contingent 2")]
    Contingent2,
    #[serde(rename = "Contract Faculty")]
    ContractFaculty,
    #[serde(rename = "PTK Faculty")]
    PtkFaculty,
}

impl EmployeeType {
    /// Display label, also used as an aggregation key component
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contingent1 => "Contingent 1",
            Self::FacultyHourly => "Faculty Hourly",
            Self::Student => "Student",
            Self::Exempt => "Exempt",
            Self::Faculty => "Faculty",
            Self::GraduateAssistant => "Graduate Assistant",
            Self::NonExempt => "Non-exempt",
            Self::Contingent2 => "Contingent 2",
            Self::ContractFaculty => "Contract Faculty",
            Self::PtkFaculty => "PTK Faculty",
        }
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of an organizational unit in the hierarchy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationKind {
    /// Primary grouping level for cost summaries
    Department,
    /// Parent grouping of departments
    Division,
}

/// Organizational unit (department or division)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unit code; report rows are ordered ascending by this
    pub code: String,
    /// Display name
    pub name: String,
    /// Hierarchy level
    pub kind: OrganizationKind,
    /// Code of the parent unit; departments point at their division
    pub parent_code: Option<String>,
}

/// Review workflow status a request can be in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStatus {
    /// Row ID, referenced by requests and report parameters
    pub id: Uuid,
    /// Short machine code (e.g. "Approved")
    pub code: String,
    /// Display name
    pub name: String,
}

/// Fiscal-year marker used to label report output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Display label (e.g. "FY2027")
    pub name: String,
}

/// A personnel request record, as the engine sees it
///
/// The full request model (justifications, pay details, per-kind validation)
/// belongs to the tracking application; strategies only need the grouping
/// attributes and the monetary totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelRequest {
    /// Row ID
    pub id: Uuid,
    /// Request flavor
    pub kind: RequestKind,
    /// Position being requested
    pub position_title: String,
    /// Employee classification
    pub employee_type: EmployeeType,
    /// Code of the owning department
    pub organization_code: String,
    /// Current review status
    pub review_status_id: Uuid,
    /// Annual cost in cents; `None` when not yet known
    pub annual_cost_cents: Option<i64>,
    /// Non-operational funding in cents; `None` when not applicable
    pub nonop_funds_cents: Option<i64>,
}
