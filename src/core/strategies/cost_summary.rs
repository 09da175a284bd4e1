//! Labor request cost summary
//!
//! Aggregates annual costs of labor and assistance requests into one row per
//! department, grouped for presentation by division. Totals are keyed by
//! `(department_code, employee_type)` so row assembly is a plain lookup with
//! zero defaults.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::core::aggregate::Accumulator;
use crate::core::strategies::ReportStrategy;
use crate::core::types::{
    EmployeeType, FiscalYear, Organization, OrganizationKind, ReportFormat, RequestKind,
    ReviewStatus,
};
use crate::storage::RecordStore;
use crate::utils::error::{EngineError, Result};

const MISSING_STATUSES_MESSAGE: &str = "At least one review status must be specified!";

/// One department's row in the summary table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    /// Department display name
    pub department: String,
    /// Code of the department's parent division
    pub division: String,
    /// Contingent 1 annual cost total, in cents
    pub c1: i64,
    /// Hourly faculty annual cost total, in cents
    pub hourly_faculty: i64,
    /// Student annual cost total, in cents
    pub students: i64,
    /// Non-operational funding total, in cents
    pub other_support: i64,
}

/// Aggregated result handed to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummaryData {
    /// One row per department, ascending by department code
    pub summary_data: Vec<SummaryRow>,
    /// All divisions, for presentation grouping
    pub divisions: Vec<Organization>,
    /// The year currently taking requests (the next fiscal year)
    pub current_fiscal_year: FiscalYear,
    /// The previous year that took requests (the present fiscal year)
    pub previous_fiscal_year: FiscalYear,
    /// The review statuses the caller restricted the summary to
    pub allowed_review_statuses: Vec<ReviewStatus>,
}

/// A summary report for the costs of labor and assistance requests
#[derive(Debug, Clone)]
pub struct LaborRequestsCostSummaryReport {
    review_status_ids: Option<Vec<Uuid>>,
}

impl LaborRequestsCostSummaryReport {
    /// Registry tag for this report
    pub const NAME: &'static str = "labor_requests_cost_summary";

    /// Build an instance from a report row's parameter bag.
    ///
    /// Malformed parameters never fail here; they surface later through
    /// `validate_parameters`.
    pub fn from_parameters(parameters: &serde_json::Value) -> Self {
        let review_status_ids = parameters
            .get("review_status_ids")
            .and_then(|ids| serde_json::from_value::<Vec<Uuid>>(ids.clone()).ok());
        Self { review_status_ids }
    }

    async fn resolve_allowed_statuses(
        &self,
        store: &dyn RecordStore,
        ids: &[Uuid],
    ) -> Result<Vec<ReviewStatus>> {
        let mut statuses = Vec::with_capacity(ids.len());
        for id in ids {
            let status = store.find_review_status(*id).await?.ok_or_else(|| {
                EngineError::data_access(format!("review status {id} does not exist"))
            })?;
            statuses.push(status);
        }
        Ok(statuses)
    }
}

#[async_trait]
impl ReportStrategy for LaborRequestsCostSummaryReport {
    fn description(&self) -> &'static str {
        "A summary report for the costs of Labor and Assistance requests, by division"
    }

    fn supported_formats(&self) -> &'static [ReportFormat] {
        &[ReportFormat::Csv]
    }

    fn template_id(&self) -> &'static str {
        Self::NAME
    }

    fn validate_parameters(&self) -> std::result::Result<(), String> {
        match &self.review_status_ids {
            Some(ids) if !ids.is_empty() => Ok(()),
            _ => Err(MISSING_STATUSES_MESSAGE.to_string()),
        }
    }

    async fn query(&self, store: &dyn RecordStore) -> Result<serde_json::Value> {
        // validate_parameters ran first; an empty set here is a caller bug.
        let ids = self.review_status_ids.clone().unwrap_or_default();
        let allowed_review_statuses = self.resolve_allowed_statuses(store, &ids).await?;
        let allowed_ids: HashSet<Uuid> =
            allowed_review_statuses.iter().map(|s| s.id).collect();

        // Annual cost totals keyed by (department_code, employee_type);
        // nonop funding keyed by (department_code, "other_support").
        let mut annual_cost_totals: Accumulator<(String, String)> = Accumulator::new();
        let mut other_support_totals: Accumulator<(String, String)> = Accumulator::new();

        let requests = store.personnel_requests(Some(RequestKind::Labor)).await?;
        debug!(count = requests.len(), "scanning labor requests");

        for request in &requests {
            if !allowed_ids.contains(&request.review_status_id) {
                continue;
            }

            let department_code = request.organization_code.clone();
            if let Some(cents) = request.annual_cost_cents {
                annual_cost_totals.add(
                    (department_code.clone(), request.employee_type.as_str().to_string()),
                    cents,
                );
            }
            if let Some(cents) = request.nonop_funds_cents {
                other_support_totals.add((department_code, "other_support".to_string()), cents);
            }
        }

        // One row per department, ascending by code. The sort here is the
        // ordering contract for the rendered output; store iteration order
        // is not trusted.
        let mut departments = store.organizations(OrganizationKind::Department).await?;
        departments.sort_by(|a, b| a.code.cmp(&b.code));

        let mut summary_data = Vec::with_capacity(departments.len());
        for dept in &departments {
            let code = dept.code.clone();
            let division = dept.parent_code.clone().ok_or_else(|| {
                EngineError::data_access(format!(
                    "department {} has no parent division",
                    dept.code
                ))
            })?;
            summary_data.push(SummaryRow {
                department: dept.name.clone(),
                division,
                c1: annual_cost_totals
                    .get(&(code.clone(), EmployeeType::Contingent1.as_str().to_string())),
                hourly_faculty: annual_cost_totals
                    .get(&(code.clone(), EmployeeType::FacultyHourly.as_str().to_string())),
                students: annual_cost_totals
                    .get(&(code.clone(), EmployeeType::Student.as_str().to_string())),
                other_support: other_support_totals
                    .get(&(code, "other_support".to_string())),
            });
        }

        let divisions = store.organizations(OrganizationKind::Division).await?;

        // In this context the "current" fiscal year is the one taking
        // requests, which is the store's next FY; the "previous" one is the
        // store's present FY.
        let current_fiscal_year = store.next_fiscal_year().await?;
        let previous_fiscal_year = store.current_fiscal_year().await?;

        let data = CostSummaryData {
            summary_data,
            divisions,
            current_fiscal_year,
            previous_fiscal_year,
            allowed_review_statuses,
        };
        Ok(serde_json::to_value(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PersonnelRequest;
    use crate::storage::MemoryStore;

    fn status(code: &str) -> ReviewStatus {
        ReviewStatus {
            id: Uuid::new_v4(),
            code: code.into(),
            name: code.into(),
        }
    }

    fn labor_request(
        org: &str,
        employee_type: EmployeeType,
        status_id: Uuid,
        annual_cost_cents: Option<i64>,
        nonop_funds_cents: Option<i64>,
    ) -> PersonnelRequest {
        PersonnelRequest {
            id: Uuid::new_v4(),
            kind: RequestKind::Labor,
            position_title: "Library Technician".into(),
            employee_type,
            organization_code: org.into(),
            review_status_id: status_id,
            annual_cost_cents,
            nonop_funds_cents,
        }
    }

    async fn seeded_store() -> (MemoryStore, ReviewStatus, ReviewStatus) {
        let store = MemoryStore::new();
        let approved = status("Approved");
        let under_review = status("UnderReview");
        store.insert_review_status(approved.clone()).await;
        store.insert_review_status(under_review.clone()).await;
        store
            .insert_organization(Organization {
                code: "01".into(),
                name: "Public Services".into(),
                kind: OrganizationKind::Division,
                parent_code: None,
            })
            .await;
        store
            .insert_organization(Organization {
                code: "10".into(),
                name: "Access Services".into(),
                kind: OrganizationKind::Department,
                parent_code: Some("01".into()),
            })
            .await;
        store
            .set_fiscal_years(
                FiscalYear { name: "FY2026".into() },
                FiscalYear { name: "FY2027".into() },
            )
            .await;
        (store, approved, under_review)
    }

    fn strategy_for(ids: &[Uuid]) -> LaborRequestsCostSummaryReport {
        LaborRequestsCostSummaryReport::from_parameters(
            &serde_json::json!({ "review_status_ids": ids }),
        )
    }

    #[test]
    fn test_missing_parameters_are_invalid_with_message() {
        let strategy = LaborRequestsCostSummaryReport::from_parameters(&serde_json::json!({}));
        assert_eq!(
            strategy.validate_parameters().unwrap_err(),
            MISSING_STATUSES_MESSAGE
        );

        let strategy = LaborRequestsCostSummaryReport::from_parameters(
            &serde_json::json!({ "review_status_ids": [] }),
        );
        assert!(strategy.validate_parameters().is_err());
    }

    #[test]
    fn test_malformed_parameters_do_not_panic() {
        let strategy = LaborRequestsCostSummaryReport::from_parameters(
            &serde_json::json!({ "review_status_ids": "not-an-array" }),
        );
        assert!(strategy.validate_parameters().is_err());

        let strategy = LaborRequestsCostSummaryReport::from_parameters(
            &serde_json::json!({ "review_status_ids": [123, true] }),
        );
        assert!(strategy.validate_parameters().is_err());
    }

    #[tokio::test]
    async fn test_excluded_statuses_and_zero_defaults() {
        // The worked example: unit "10" has a Contingent 1 request at
        // $1,200.00 in an allowed status and a Faculty Hourly request at
        // $800.00 in an excluded one.
        let (store, approved, under_review) = seeded_store().await;
        store
            .insert_request(labor_request(
                "10",
                EmployeeType::Contingent1,
                approved.id,
                Some(120_000),
                None,
            ))
            .await;
        store
            .insert_request(labor_request(
                "10",
                EmployeeType::FacultyHourly,
                under_review.id,
                Some(80_000),
                None,
            ))
            .await;

        let strategy = strategy_for(&[approved.id]);
        strategy.validate_parameters().unwrap();
        let value = strategy.query(&store).await.unwrap();
        let data: CostSummaryData = serde_json::from_value(value).unwrap();

        assert_eq!(data.summary_data.len(), 1);
        let row = &data.summary_data[0];
        assert_eq!(row.department, "Access Services");
        assert_eq!(row.division, "01");
        assert_eq!(row.c1, 120_000);
        assert_eq!(row.hourly_faculty, 0);
        assert_eq!(row.students, 0);
        assert_eq!(row.other_support, 0);

        assert_eq!(data.divisions.len(), 1);
        assert_eq!(data.current_fiscal_year.name, "FY2027");
        assert_eq!(data.previous_fiscal_year.name, "FY2026");
        assert_eq!(data.allowed_review_statuses.len(), 1);
        assert_eq!(data.allowed_review_statuses[0].code, "Approved");
    }

    #[tokio::test]
    async fn test_null_amounts_contribute_nothing() {
        let (store, approved, _) = seeded_store().await;
        store
            .insert_request(labor_request(
                "10",
                EmployeeType::Student,
                approved.id,
                None,
                Some(40_000),
            ))
            .await;

        let strategy = strategy_for(&[approved.id]);
        let value = strategy.query(&store).await.unwrap();
        let data: CostSummaryData = serde_json::from_value(value).unwrap();

        let row = &data.summary_data[0];
        assert_eq!(row.students, 0);
        assert_eq!(row.other_support, 40_000);
    }

    #[tokio::test]
    async fn test_rows_sorted_by_department_code_and_deterministic() {
        let (store, approved, _) = seeded_store().await;
        // Insert departments out of code order.
        store
            .insert_organization(Organization {
                code: "30".into(),
                name: "Special Collections".into(),
                kind: OrganizationKind::Department,
                parent_code: Some("01".into()),
            })
            .await;
        store
            .insert_organization(Organization {
                code: "20".into(),
                name: "Cataloging".into(),
                kind: OrganizationKind::Department,
                parent_code: Some("01".into()),
            })
            .await;
        store
            .insert_request(labor_request(
                "20",
                EmployeeType::Student,
                approved.id,
                Some(55_000),
                None,
            ))
            .await;

        let strategy = strategy_for(&[approved.id]);
        let first = strategy.query(&store).await.unwrap();
        let second = strategy.query(&store).await.unwrap();

        let data: CostSummaryData = serde_json::from_value(first.clone()).unwrap();
        let codes: Vec<&str> = data
            .summary_data
            .iter()
            .map(|r| r.department.as_str())
            .collect();
        assert_eq!(codes, ["Access Services", "Cataloging", "Special Collections"]);
        assert_eq!(data.summary_data[1].students, 55_000);

        // Byte-for-byte reproducible given identical underlying data.
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_non_labor_requests_are_ignored() {
        let (store, approved, _) = seeded_store().await;
        let mut contractor = labor_request(
            "10",
            EmployeeType::Contingent2,
            approved.id,
            Some(900_000),
            None,
        );
        contractor.kind = RequestKind::Contractor;
        store.insert_request(contractor).await;

        let strategy = strategy_for(&[approved.id]);
        let value = strategy.query(&store).await.unwrap();
        let data: CostSummaryData = serde_json::from_value(value).unwrap();
        assert!(data.summary_data.iter().all(|r| {
            r.c1 == 0 && r.hourly_faculty == 0 && r.students == 0 && r.other_support == 0
        }));
    }

    #[tokio::test]
    async fn test_orphaned_department_is_data_access_error() {
        let (store, approved, _) = seeded_store().await;
        store
            .insert_organization(Organization {
                code: "99".into(),
                name: "Detached Unit".into(),
                kind: OrganizationKind::Department,
                parent_code: None,
            })
            .await;

        let strategy = strategy_for(&[approved.id]);
        let err = strategy.query(&store).await.unwrap_err();
        assert!(matches!(err, EngineError::DataAccess(_)));
        assert!(err.to_string().contains("99"));
    }

    #[tokio::test]
    async fn test_dangling_status_id_is_data_access_error() {
        let (store, _, _) = seeded_store().await;
        let strategy = strategy_for(&[Uuid::new_v4()]);
        let err = strategy.query(&store).await.unwrap_err();
        assert!(matches!(err, EngineError::DataAccess(_)));
    }
}
