//! MFI-facing endpoints: application review queue, status transitions,
//! portfolio summary, and package download.

use faranga_core::{ApplicationStatus, StatusUpdate};
use faranga_storage::SessionStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::farmer::ApplicationDocument;
use crate::gateway::{token_header, urlencoded, ApiGateway, Body, Download, Method};

/// An application as seen by the reviewing MFI: the farmer's request
/// plus applicant details and model outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfiApplication {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub loan_amount_requested: f64,
    #[serde(default)]
    pub loan_duration_months: u32,
    #[serde(default)]
    pub employment_status: String,
    #[serde(default)]
    pub annual_income: f64,
    #[serde(default)]
    pub credit_score: u32,
    #[serde(default)]
    pub eligibility_approved: Option<bool>,
    #[serde(default)]
    pub eligibility_reason: Option<String>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub recommended_amount: Option<f64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status_history: Vec<StatusUpdate>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
    #[serde(default)]
    pub folder_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfiApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<MfiApplication>,
    #[serde(default)]
    pub count: u64,
}

/// Review decision for `/mfi/applications/<id>/review/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

/// Optional loan terms attached to an approval (or a reason to a
/// rejection). Absent fields let the backend fall back to the model
/// recommendation and its defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Outcome of a review call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub reviewed_at: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Body of `/mfi/applications/<id>/update-status/`. Absent fields are
/// omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
}

/// Acknowledgement of a status transition, with the refreshed history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedStatus {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub status_history: Vec<StatusUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentCounts {
    #[serde(default)]
    pub paid: u64,
    #[serde(default)]
    pub overdue: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub total: u64,
}

/// Portfolio and repayment performance summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default)]
    pub total_loans: u64,
    #[serde(default)]
    pub total_amount_disbursed: f64,
    pub repayments: RepaymentCounts,
}

/// Authenticated MFI endpoints.
pub struct MfiClient<'a> {
    gateway: &'a ApiGateway,
    session: &'a SessionStore,
}

impl<'a> MfiClient<'a> {
    pub fn new(gateway: &'a ApiGateway, session: &'a SessionStore) -> Self {
        MfiClient { gateway, session }
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![token_header(self.session.token().as_deref())]
    }

    /// GET `/mfi/applications/?status=..` - review queue. `None` asks
    /// for the pending queue; pass `"all"` for everything.
    pub fn applications(
        &self,
        status_filter: Option<&str>,
    ) -> Result<MfiApplicationsResponse, ApiError> {
        let status = status_filter.unwrap_or("pending");
        let path = format!("/mfi/applications/?status={}", urlencoded(status));
        self.gateway
            .request(Method::Get, &path, &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// POST `/mfi/applications/<id>/review/` - approve or reject.
    pub fn review(
        &self,
        application_id: i64,
        action: ReviewAction,
        terms: &ReviewTerms,
    ) -> Result<ReviewOutcome, ApiError> {
        let mut body =
            serde_json::to_value(terms).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "action".to_string(),
                serde_json::Value::String(action.as_str().to_string()),
            );
        }
        let path = format!("/mfi/applications/{application_id}/review/");
        self.gateway
            .request(Method::Post, &path, &self.auth_headers(), Body::Json(body))?
            .deserialize()
    }

    /// POST `/mfi/applications/<id>/update-status/` - request a status
    /// transition with an optional note and loan terms.
    pub fn update_status(
        &self,
        application_id: i64,
        request: &StatusUpdateRequest,
    ) -> Result<UpdatedStatus, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let path = format!("/mfi/applications/{application_id}/update-status/");
        self.gateway
            .request(Method::Post, &path, &self.auth_headers(), Body::Json(body))?
            .deserialize()
    }

    /// GET `/mfi/portfolio/`
    pub fn portfolio(&self) -> Result<PortfolioSummary, ApiError> {
        self.gateway
            .request(Method::Get, "/mfi/portfolio/", &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// GET `/mfi/applications/<id>/package/` - binary ZIP download.
    pub fn download_package(&self, application_id: i64) -> Result<Download, ApiError> {
        let path = format!("/mfi/applications/{application_id}/package/");
        self.gateway.download(&path, &self.auth_headers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_update_omits_absent_fields() {
        let request = StatusUpdateRequest {
            status: ApplicationStatus::DocumentsRequested,
            note: Some("Please add the land certificate".to_string()),
            amount: None,
            interest_rate: None,
            duration_months: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["status"], "documents_requested");
        assert_eq!(value["note"], "Please add the land certificate");
        assert!(value.get("amount").is_none());
        assert!(value.get("interest_rate").is_none());
    }

    #[test]
    fn review_terms_merge_with_action() {
        // The wire body is {action, ...terms}; mirrored by `review`.
        let terms = ReviewTerms {
            amount: Some(180_000.0),
            interest_rate: Some(0.12),
            duration_months: Some(12),
            rejection_reason: None,
        };
        let mut value = serde_json::to_value(&terms).unwrap();
        value.as_object_mut().unwrap().insert(
            "action".to_string(),
            serde_json::Value::String(ReviewAction::Approve.as_str().to_string()),
        );
        assert_eq!(value["action"], "approve");
        assert_eq!(value["amount"], 180_000.0);
        assert!(value.get("rejection_reason").is_none());
    }

    #[test]
    fn portfolio_deserializes() {
        let body = r#"{
            "total_loans": 4,
            "total_amount_disbursed": 720000.0,
            "repayments": {"paid": 10, "overdue": 2, "pending": 36, "total": 48}
        }"#;
        let summary: PortfolioSummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.total_loans, 4);
        assert_eq!(summary.repayments.overdue, 2);
    }
}
