use faranga_core::{Role, Session};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::{ApiGateway, Body, Method};

/// Request payload for `register`. Admin accounts are backend-created;
/// the endpoint accepts farmer and microfinance signups.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
}

/// Plain-message acknowledgements (forgot/reset password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Auth endpoints. No token required.
pub struct AuthClient<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> AuthClient<'a> {
    pub fn new(gateway: &'a ApiGateway) -> Self {
        AuthClient { gateway }
    }

    /// POST `/auth/register/` - returns a live session on success.
    pub fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.gateway
            .request(Method::Post, "/auth/register/", &[], Body::Json(body))?
            .deserialize()
    }

    /// POST `/auth/login/` - all roles. The email is trimmed and
    /// lowercased before it goes on the wire.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({
            "email": normalize_email(email),
            "password": password,
        });
        self.gateway
            .request(Method::Post, "/auth/login/", &[], Body::Json(body))?
            .deserialize()
    }

    /// POST `/auth/forgot-password/` - request a reset email. The
    /// backend answers the same whether or not the account exists.
    pub fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let body = serde_json::json!({ "email": normalize_email(email) });
        self.gateway
            .request(Method::Post, "/auth/forgot-password/", &[], Body::Json(body))?
            .deserialize()
    }

    /// POST `/auth/reset-password/` - set a new password with a reset
    /// token (trimmed).
    pub fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = serde_json::json!({
            "token": token.trim(),
            "new_password": new_password,
        });
        self.gateway
            .request(Method::Post, "/auth/reset-password/", &[], Body::Json(body))?
            .deserialize()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn register_request_serializes_role_code() {
        let request = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "secret123".to_string(),
            role: Role::Microfinance,
            name: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["role"], "microfinance");
        assert_eq!(value["name"], "");
    }
}
