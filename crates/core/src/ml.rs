//! ML scoring payloads and canonical outcome types.
//!
//! The backend's three scoring endpoints are loose about response field
//! names (snake_case, camelCase, and bare `prediction` all appear in the
//! wild), so each outcome type owns a `from_value` normalization step.
//! Callers never probe alternate spellings at the call site.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Applicant features accepted by all three scoring endpoints.
///
/// Wire field names are PascalCase, matching the model feature columns
/// the backend trains on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantFeatures {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "AnnualIncome")]
    pub annual_income: f64,
    #[serde(rename = "CreditScore")]
    pub credit_score: u32,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: f64,
    #[serde(rename = "LoanDuration")]
    pub loan_duration_months: u32,
    #[serde(rename = "DebtToIncomeRatio")]
    pub debt_to_income_ratio: f64,
    #[serde(rename = "EmploymentStatus")]
    pub employment_status: String,
    #[serde(rename = "EducationLevel")]
    pub education_level: String,
    #[serde(rename = "MaritalStatus", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(rename = "LoanPurpose", skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<String>,
}

impl Default for ApplicantFeatures {
    fn default() -> Self {
        ApplicantFeatures {
            age: 35,
            annual_income: 600_000.0,
            credit_score: 600,
            loan_amount: 200_000.0,
            loan_duration_months: 24,
            debt_to_income_ratio: 0.35,
            employment_status: "Self-Employed".to_string(),
            education_level: "High School".to_string(),
            marital_status: Some("Married".to_string()),
            loan_purpose: Some("Other".to_string()),
        }
    }
}

/// A scoring response that matched none of the known field spellings.
#[derive(Debug, thiserror::Error)]
#[error("could not read {endpoint} response: expected one of {expected}")]
pub struct NormalizeError {
    pub endpoint: &'static str,
    pub expected: &'static str,
}

/// Canonical result of the eligibility model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub approved: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EligibilityOutcome {
    /// Normalize a raw response: `approved`, then a nonzero `prediction`,
    /// then `eligible`.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let approved = value
            .get("approved")
            .and_then(Value::as_bool)
            .or_else(|| {
                value
                    .get("prediction")
                    .and_then(Value::as_i64)
                    .map(|p| p != 0)
            })
            .or_else(|| value.get("eligible").and_then(Value::as_bool))
            .ok_or(NormalizeError {
                endpoint: "eligibility",
                expected: "approved, prediction, eligible",
            })?;
        Ok(EligibilityOutcome {
            approved,
            reason: string_field(value, "reason"),
            description: string_field(value, "description"),
        })
    }
}

/// Canonical result of the default-risk model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskOutcome {
    pub score: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RiskOutcome {
    /// Normalize a raw response: `risk_score`, `riskScore`, `score`,
    /// `prediction`.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let score = number_field(value, &["risk_score", "riskScore", "score", "prediction"])
            .ok_or(NormalizeError {
                endpoint: "risk",
                expected: "risk_score, riskScore, score, prediction",
            })?;
        Ok(RiskOutcome {
            score,
            reason: string_field(value, "reason"),
            description: string_field(value, "description"),
        })
    }
}

/// Canonical result of the recommended-amount model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAmount {
    pub amount: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RecommendedAmount {
    /// Normalize a raw response: `recommended_amount`, `recommendedAmount`,
    /// `amount`, `prediction`.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let amount = number_field(
            value,
            &["recommended_amount", "recommendedAmount", "amount", "prediction"],
        )
        .ok_or(NormalizeError {
            endpoint: "recommend-amount",
            expected: "recommended_amount, recommendedAmount, amount, prediction",
        })?;
        Ok(RecommendedAmount {
            amount,
            reason: string_field(value, "reason"),
            description: string_field(value, "description"),
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

fn number_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn features_serialize_with_model_column_names() {
        let features = ApplicantFeatures::default();
        let value = serde_json::to_value(&features).unwrap();
        assert_eq!(value["Age"], 35);
        assert_eq!(value["AnnualIncome"], 600_000.0);
        assert_eq!(value["EmploymentStatus"], "Self-Employed");
        assert_eq!(value["MaritalStatus"], "Married");
        assert!(value.get("age").is_none());
    }

    #[test]
    fn optional_features_are_omitted_when_absent() {
        let features = ApplicantFeatures {
            marital_status: None,
            loan_purpose: None,
            ..ApplicantFeatures::default()
        };
        let value = serde_json::to_value(&features).unwrap();
        assert!(value.get("MaritalStatus").is_none());
        assert!(value.get("LoanPurpose").is_none());
    }

    #[test]
    fn eligibility_probes_each_alias() {
        let approved = EligibilityOutcome::from_value(&json!({"approved": true})).unwrap();
        assert!(approved.approved);

        let via_prediction = EligibilityOutcome::from_value(&json!({"prediction": 0})).unwrap();
        assert!(!via_prediction.approved);

        let via_eligible = EligibilityOutcome::from_value(&json!({"eligible": true})).unwrap();
        assert!(via_eligible.approved);
    }

    #[test]
    fn eligibility_carries_reason_and_description() {
        let outcome = EligibilityOutcome::from_value(&json!({
            "approved": false,
            "reason": "Credit score below threshold",
            "description": "Model 1 predicts loan approval"
        }))
        .unwrap();
        assert_eq!(outcome.reason.as_deref(), Some("Credit score below threshold"));
        assert!(outcome.description.is_some());
    }

    #[test]
    fn risk_probes_each_alias() {
        for body in [
            json!({"risk_score": 0.42}),
            json!({"riskScore": 0.42}),
            json!({"score": 0.42}),
            json!({"prediction": 0.42}),
        ] {
            let outcome = RiskOutcome::from_value(&body).unwrap();
            assert!((outcome.score - 0.42).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn amount_probes_each_alias() {
        for body in [
            json!({"recommended_amount": 150000.0}),
            json!({"recommendedAmount": 150000.0}),
            json!({"amount": 150000.0}),
        ] {
            let outcome = RecommendedAmount::from_value(&body).unwrap();
            assert!((outcome.amount - 150_000.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn unrecognized_shape_is_an_error() {
        let err = RiskOutcome::from_value(&json!({"verdict": "fine"})).unwrap_err();
        assert_eq!(err.endpoint, "risk");
        assert!(err.to_string().contains("risk_score"));
    }
}
