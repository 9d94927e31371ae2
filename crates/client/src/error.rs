use serde_json::Value;

/// Best-effort parsed body of a non-success response.
///
/// JSON parse is attempted first; anything unparsable is kept as raw
/// text rather than surfaced as a second error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(text: String) -> ErrorBody {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }

    /// The backend's `error` (or `detail`) message, when the body
    /// carries one. Falls back to the first field-error entry of a
    /// validation body like `{"email": ["Enter a valid email."]}`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(value) => {
                if let Some(message) = value
                    .get("error")
                    .or_else(|| value.get("detail"))
                    .and_then(Value::as_str)
                {
                    return Some(message);
                }
                value
                    .as_object()?
                    .values()
                    .find_map(|field| field.as_array()?.first()?.as_str())
            }
            ErrorBody::Text(_) => None,
        }
    }
}

/// All errors surfaced by the API client.
///
/// Callers pattern-match on known statuses (401 invalid credentials,
/// 403 access denied, 400 validation detail) and fall back to a generic
/// message otherwise. Nothing is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status} {message}")]
    Status {
        status: u16,
        message: String,
        body: ErrorBody,
    },

    /// No response was received (connect failure, broken transfer).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response whose body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// The backend's own message, when one was sent.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => body.detail(),
            _ => None,
        }
    }

    /// Validation detail extracted from a 400 body.
    pub fn validation_detail(&self) -> Option<&str> {
        if self.status() == Some(400) {
            self.detail()
        } else {
            None
        }
    }
}

impl From<faranga_core::NormalizeError> for ApiError {
    fn from(e: faranga_core::NormalizeError) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_parse_prefers_json() {
        let body = ErrorBody::parse(r#"{"error": "Invalid email or password."}"#.to_string());
        assert_eq!(body.detail(), Some("Invalid email or password."));
    }

    #[test]
    fn detail_reads_field_error_lists() {
        let body = ErrorBody::Json(json!({"email": ["Enter a valid email address."]}));
        assert_eq!(body.detail(), Some("Enter a valid email address."));
    }

    #[test]
    fn body_parse_falls_back_to_text() {
        let body = ErrorBody::parse("<html>502 Bad Gateway</html>".to_string());
        assert_eq!(body, ErrorBody::Text("<html>502 Bad Gateway</html>".to_string()));
        assert!(body.detail().is_none());
    }

    #[test]
    fn status_helpers() {
        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
            body: ErrorBody::Json(json!({"error": "Invalid email or password."})),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_forbidden());
        assert_eq!(err.detail(), Some("Invalid email or password."));
        assert!(err.validation_detail().is_none());

        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn validation_detail_only_for_400() {
        let err = ApiError::Status {
            status: 400,
            message: "Bad Request".to_string(),
            body: ErrorBody::Json(json!({"error": "Age must be between 18 and 100."})),
        };
        assert_eq!(
            err.validation_detail(),
            Some("Age must be between 18 and 100.")
        );
    }
}
