//! Farmer-facing endpoints: profile, applications, documents, packages,
//! loans, and repayments.

use faranga_core::{ApplicationStatus, Language, StatusUpdate};
use faranga_storage::SessionStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::gateway::{token_header, ApiGateway, Body, Download, Method};
use crate::multipart::MultipartForm;

/// Farmer profile as returned by GET/PATCH `/farmer/profile/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub id: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cooperative_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooperative_name: Option<String>,
}

/// One required document for a loan application, localized server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub document_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<RequiredDocument>,
}

/// The loan application form as submitted from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplicationForm {
    pub age: u32,
    pub annual_income: f64,
    pub credit_score: u32,
    pub loan_amount_requested: f64,
    pub loan_duration_months: u32,
    pub employment_status: String,
    pub education_level: String,
    pub marital_status: String,
    pub loan_purpose: String,
    #[serde(default)]
    pub farming_crops_or_activity: String,
    #[serde(default)]
    pub farming_land_size_hectares: Option<f64>,
    #[serde(default)]
    pub farming_season: String,
    #[serde(default)]
    pub farming_estimated_yield: Option<f64>,
    #[serde(default)]
    pub farming_livestock: String,
    #[serde(default)]
    pub farming_notes: String,
}

impl Default for LoanApplicationForm {
    fn default() -> Self {
        LoanApplicationForm {
            age: 35,
            annual_income: 600_000.0,
            credit_score: 600,
            loan_amount_requested: 200_000.0,
            loan_duration_months: 24,
            employment_status: "Self-Employed".to_string(),
            education_level: "High School".to_string(),
            marital_status: "Married".to_string(),
            loan_purpose: "Other".to_string(),
            farming_crops_or_activity: String::new(),
            farming_land_size_hectares: None,
            farming_season: String::new(),
            farming_estimated_yield: None,
            farming_livestock: String::new(),
            farming_notes: String::new(),
        }
    }
}

/// Acknowledgement of a submitted application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedApplication {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub eligibility_approved: Option<bool>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub recommended_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A document attached to an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDocument {
    #[serde(default)]
    pub id: Option<i64>,
    pub document_type: String,
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
}

/// One of the farmer's loan applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub loan_amount_requested: f64,
    #[serde(default)]
    pub loan_duration_months: u32,
    #[serde(default)]
    pub eligibility_approved: Option<bool>,
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
    #[serde(default)]
    pub farming_crops_or_activity: String,
    #[serde(default)]
    pub farming_land_size_hectares: Option<f64>,
    #[serde(default)]
    pub farming_season: String,
    #[serde(default)]
    pub farming_estimated_yield: Option<f64>,
    #[serde(default)]
    pub farming_livestock: String,
    #[serde(default)]
    pub farming_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<LoanApplication>,
    #[serde(default)]
    pub count: u64,
}

/// A disbursed loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    #[serde(default)]
    pub application_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub duration_months: u32,
    #[serde(default)]
    pub monthly_payment: f64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoansResponse {
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub count: u64,
}

/// A scheduled repayment on a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repayment {
    pub id: i64,
    #[serde(default)]
    pub loan_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentsResponse {
    #[serde(default)]
    pub repayments: Vec<Repayment>,
    #[serde(default)]
    pub count: u64,
}

/// Authenticated farmer endpoints. The bearer token is read from the
/// injected session store on every call.
pub struct FarmerClient<'a> {
    gateway: &'a ApiGateway,
    session: &'a SessionStore,
}

impl<'a> FarmerClient<'a> {
    pub fn new(gateway: &'a ApiGateway, session: &'a SessionStore) -> Self {
        FarmerClient { gateway, session }
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![token_header(self.session.token().as_deref())]
    }

    /// GET `/farmer/profile/`
    pub fn profile(&self) -> Result<FarmerProfile, ApiError> {
        self.gateway
            .request(Method::Get, "/farmer/profile/", &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// PATCH `/farmer/profile/`
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<FarmerProfile, ApiError> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.gateway
            .request(
                Method::Patch,
                "/farmer/profile/",
                &self.auth_headers(),
                Body::Json(body),
            )?
            .deserialize()
    }

    /// GET `/farmer/required-documents/?language=..` - required documents
    /// for a loan application, labels localized server-side. No auth.
    pub fn required_documents(
        &self,
        language: Language,
    ) -> Result<RequiredDocumentsResponse, ApiError> {
        let path = format!("/farmer/required-documents/?language={}", language.code());
        self.gateway
            .request(Method::Get, &path, &[], Body::None)?
            .deserialize()
    }

    /// GET `/farmer/applications/`
    pub fn applications(&self) -> Result<ApplicationsResponse, ApiError> {
        self.gateway
            .request(
                Method::Get,
                "/farmer/applications/",
                &self.auth_headers(),
                Body::None,
            )?
            .deserialize()
    }

    /// POST `/farmer/applications/` - submit a new application. The
    /// display language rides along so server-side explanations come
    /// back localized.
    pub fn submit_application(
        &self,
        form: &LoanApplicationForm,
        language: Language,
    ) -> Result<SubmittedApplication, ApiError> {
        let mut body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(map) = body.as_object_mut() {
            map.insert("language".to_string(), Value::String(language.code().to_string()));
        }
        self.gateway
            .request(
                Method::Post,
                "/farmer/applications/",
                &self.auth_headers(),
                Body::Json(body),
            )?
            .deserialize()
    }

    /// GET `/farmer/applications/<id>/documents/`
    pub fn application_documents(&self, application_id: i64) -> Result<DocumentsResponse, ApiError> {
        let path = format!("/farmer/applications/{application_id}/documents/");
        self.gateway
            .request(Method::Get, &path, &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// POST `/farmer/applications/<id>/documents/` - multipart upload
    /// with fields `document_type` and `file`.
    pub fn upload_document(
        &self,
        application_id: i64,
        document_type: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ApplicationDocument, ApiError> {
        let path = format!("/farmer/applications/{application_id}/documents/");
        let form = MultipartForm::new()
            .text("document_type", document_type)
            .file("file", filename, content_type, bytes);
        self.gateway
            .request(
                Method::Post,
                &path,
                &self.auth_headers(),
                Body::Multipart(form),
            )?
            .deserialize()
    }

    /// GET `/farmer/applications/<id>/package/` - binary ZIP of the
    /// summary document plus uploaded attachments.
    pub fn download_package(&self, application_id: i64) -> Result<Download, ApiError> {
        let path = format!("/farmer/applications/{application_id}/package/");
        self.gateway.download(&path, &self.auth_headers())
    }

    /// GET `/farmer/loans/`
    pub fn loans(&self) -> Result<LoansResponse, ApiError> {
        self.gateway
            .request(Method::Get, "/farmer/loans/", &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// GET `/farmer/repayments/`
    pub fn repayments(&self) -> Result<RepaymentsResponse, ApiError> {
        self.gateway
            .request(
                Method::Get,
                "/farmer/repayments/",
                &self.auth_headers(),
                Body::None,
            )?
            .deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_form_defaults_match_the_dashboard() {
        let form = LoanApplicationForm::default();
        assert_eq!(form.age, 35);
        assert_eq!(form.loan_duration_months, 24);
        assert_eq!(form.employment_status, "Self-Employed");
    }

    #[test]
    fn profile_update_omits_absent_fields() {
        let update = ProfileUpdate {
            phone: Some("0788".to_string()),
            ..ProfileUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["phone"], "0788");
        assert!(value.get("location").is_none());
        assert!(value.get("cooperative_name").is_none());
    }

    #[test]
    fn application_list_deserializes_with_history() {
        let body = r#"{
            "applications": [{
                "id": 12,
                "status": "under_review",
                "loan_amount_requested": 250000.0,
                "loan_duration_months": 12,
                "risk_score": 0.31,
                "created_at": "2026-02-10T08:00:00",
                "status_history": [
                    {"status": "pending", "note": "", "created_at": "2026-02-10T08:00:00"},
                    {"status": "under_review", "note": "Docs look fine", "created_at": "2026-02-11T09:30:00", "updated_by_name": "Umurenge SACCO"}
                ]
            }],
            "count": 1
        }"#;
        let parsed: ApplicationsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.count, 1);
        let app = &parsed.applications[0];
        assert_eq!(app.status, ApplicationStatus::UnderReview);
        assert_eq!(app.status_history.len(), 2);
        assert!(app.documents.is_empty());
    }
}
