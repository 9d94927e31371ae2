//! Scoring seam for the three backend ML models.
//!
//! `ureq` is synchronous, so the HTTP implementation wraps each call in
//! `tokio::task::spawn_blocking`. Callers may hold several previews in
//! flight at once (the dashboard fires all three); each call is
//! independent and responses complete in any order.

use async_trait::async_trait;
use faranga_core::{
    ApplicantFeatures, EligibilityOutcome, Language, RecommendedAmount, RiskOutcome,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::gateway::{ApiGateway, Body, Method};

/// The three model preview calls, returned in canonical form.
#[async_trait]
pub trait ScoringProvider: Send + Sync {
    async fn eligibility(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<EligibilityOutcome, ApiError>;

    async fn risk(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<RiskOutcome, ApiError>;

    async fn recommend_amount(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<RecommendedAmount, ApiError>;
}

/// [`ScoringProvider`] over the platform's HTTP scoring endpoints.
pub struct HttpScoring {
    gateway: ApiGateway,
}

impl HttpScoring {
    pub fn new(gateway: ApiGateway) -> Self {
        HttpScoring { gateway }
    }

    /// The wire payload: PascalCase feature columns plus the lowercase
    /// `language` code.
    fn payload(features: &ApplicantFeatures, language: Language) -> Result<Value, ApiError> {
        let mut value =
            serde_json::to_value(features).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "language".to_string(),
                Value::String(language.code().to_string()),
            );
        }
        Ok(value)
    }

    async fn call(&self, path: &'static str, body: Value) -> Result<Value, ApiError> {
        let gateway = self.gateway.clone();
        tokio::task::spawn_blocking(move || {
            gateway
                .request(Method::Post, path, &[], Body::Json(body))?
                .into_value()
        })
        .await
        .map_err(|e| ApiError::Transport(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl ScoringProvider for HttpScoring {
    async fn eligibility(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<EligibilityOutcome, ApiError> {
        let body = Self::payload(features, language)?;
        let value = self.call("/eligibility/", body).await?;
        Ok(EligibilityOutcome::from_value(&value)?)
    }

    async fn risk(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<RiskOutcome, ApiError> {
        let body = Self::payload(features, language)?;
        let value = self.call("/risk/", body).await?;
        Ok(RiskOutcome::from_value(&value)?)
    }

    async fn recommend_amount(
        &self,
        features: &ApplicantFeatures,
        language: Language,
    ) -> Result<RecommendedAmount, ApiError> {
        let body = Self::payload(features, language)?;
        let value = self.call("/recommend-amount/", body).await?;
        Ok(RecommendedAmount::from_value(&value)?)
    }
}
