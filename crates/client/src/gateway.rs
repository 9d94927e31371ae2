//! The single choke point for all network calls to the platform backend.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ErrorBody};
use crate::multipart::MultipartForm;

/// Production API base used when no override is configured.
pub const LIVE_API_BASE: &str = "https://faranga-api.onrender.com/api";

/// Development default: the local backend dev server.
pub const DEV_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Environment variable overriding the API base URL. Read once at
/// gateway construction.
pub const API_URL_ENV: &str = "FARANGA_API_URL";

/// Environment variable overriding the backend origin used for
/// non-API links (the staff console). Read once at gateway
/// construction; when absent the origin is the base URL with its
/// trailing `/api` stripped.
pub const BACKEND_ORIGIN_ENV: &str = "FARANGA_BACKEND_URL";

/// HTTP methods the backend contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A request body.
pub enum Body {
    None,
    /// A plain structured object, serialized to JSON text.
    Json(Value),
    /// A binary multipart form, passed through unchanged.
    Multipart(MultipartForm),
}

/// A successful response payload, driven by the declared content type.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Deserialize a JSON payload into a typed response.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Payload::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            Payload::Text(_) => Err(ApiError::Decode(
                "expected a JSON response body".to_string(),
            )),
        }
    }

    /// The raw JSON value, for endpoints normalized elsewhere.
    pub fn into_value(self) -> Result<Value, ApiError> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Text(_) => Err(ApiError::Decode(
                "expected a JSON response body".to_string(),
            )),
        }
    }
}

/// A binary download: raw bytes plus the unsanitized filename hint from
/// `Content-Disposition`. Sanitization and fallback naming are the
/// caller's job.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub filename_hint: Option<String>,
}

/// HTTP client for the platform API.
///
/// One instance per process; holds the resolved base URL and a shared
/// agent. Non-success statuses are reported as [`ApiError::Status`]
/// carrying the best-effort parsed body; nothing is retried.
#[derive(Clone)]
pub struct ApiGateway {
    agent: ureq::Agent,
    base_url: String,
    backend_origin: String,
}

impl ApiGateway {
    /// Create a gateway against an explicit base URL (trailing slashes
    /// trimmed). The backend origin defaults to the base URL with its
    /// trailing `/api` stripped.
    pub fn new(base_url: &str) -> Self {
        // Statuses are data here, not transport errors: the error body
        // must stay readable for the caller.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let backend_origin = base_url
            .strip_suffix("/api")
            .unwrap_or(&base_url)
            .to_string();
        ApiGateway {
            agent,
            base_url,
            backend_origin,
        }
    }

    /// Override the backend origin (non-API links).
    pub fn with_backend_origin(mut self, origin: &str) -> Self {
        self.backend_origin = origin.trim_end_matches('/').to_string();
        self
    }

    /// Resolve the base URL from `FARANGA_API_URL` (falling back to the
    /// production API in release builds and the local dev server
    /// otherwise) and the backend origin from `FARANGA_BACKEND_URL`.
    pub fn from_env() -> Self {
        let base = std::env::var(API_URL_ENV).ok().filter(|s| !s.is_empty());
        let default = if cfg!(debug_assertions) {
            DEV_API_BASE
        } else {
            LIVE_API_BASE
        };
        let gateway = ApiGateway::new(base.as_deref().unwrap_or(default));
        match std::env::var(BACKEND_ORIGIN_ENV) {
            Ok(origin) if !origin.is_empty() => gateway.with_backend_origin(&origin),
            _ => gateway,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Origin for links outside the API, e.g. the staff console.
    pub fn backend_origin(&self) -> &str {
        &self.backend_origin
    }

    /// Issue a request and normalize the outcome.
    ///
    /// A default `Content-Type: application/json` is merged with
    /// `headers`; the caller wins on conflict. Multipart bodies carry
    /// their own boundary-bearing content type instead.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(String, String)],
        body: Body,
    ) -> Result<Payload, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let (default_content_type, body_bytes) = match body {
            Body::None => ("application/json".to_string(), None),
            Body::Json(value) => {
                let text = serde_json::to_string(&value)
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                ("application/json".to_string(), Some(text.into_bytes()))
            }
            Body::Multipart(form) => (form.content_type(), Some(form.encode())),
        };
        let merged = merge_headers(&default_content_type, headers);

        let response = self
            .send(method, &url, &merged, body_bytes)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let reason = response
            .status()
            .canonical_reason()
            .unwrap_or("API error")
            .to_string();
        let content_type = header_value(&response, "content-type");
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            let body = ErrorBody::parse(text);
            #[cfg(debug_assertions)]
            if status == 400 {
                log::warn!("[api 400] {url}: {body:?}");
            }
            return Err(ApiError::Status {
                status,
                message: reason,
                body,
            });
        }

        if content_type.contains("application/json") {
            let value =
                serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(Payload::Json(value))
        } else {
            Ok(Payload::Text(text))
        }
    }

    /// Fetch a binary payload (package ZIPs), bypassing JSON handling.
    ///
    /// Error responses go through the same status + best-effort body
    /// normalization as [`ApiGateway::request`].
    pub fn download(
        &self,
        path: &str,
        headers: &[(String, String)],
    ) -> Result<Download, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let merged: Vec<(String, String)> = headers.to_vec();

        let response = self
            .send(Method::Get, &url, &merged, None)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let reason = response
            .status()
            .canonical_reason()
            .unwrap_or("Download failed")
            .to_string();

        if !(200..300).contains(&status) {
            let text = response
                .into_body()
                .read_to_string()
                .unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: reason,
                body: ErrorBody::parse(text),
            });
        }

        let disposition = header_value(&response, "content-disposition");
        let filename_hint = parse_disposition_filename(&disposition);
        let bytes = response
            .into_body()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Download {
            bytes,
            filename_hint,
        })
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body_bytes: Option<Vec<u8>>,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        match method {
            Method::Get | Method::Delete => {
                let mut req = if method == Method::Get {
                    self.agent.get(url)
                } else {
                    self.agent.delete(url)
                };
                for (name, value) in headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            Method::Post | Method::Patch => {
                let mut req = if method == Method::Post {
                    self.agent.post(url)
                } else {
                    self.agent.patch(url)
                };
                for (name, value) in headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                match body_bytes {
                    Some(bytes) => req.send(&bytes[..]),
                    None => req.send_empty(),
                }
            }
        }
    }
}

/// The `Authorization: Token <value>` header pair. Empty when no token
/// is stored; the backend is the one rejecting unauthenticated calls.
pub(crate) fn token_header(token: Option<&str>) -> (String, String) {
    let value = match token {
        Some(t) => format!("Token {t}"),
        None => String::new(),
    };
    ("Authorization".to_string(), value)
}

/// Merge the default content type with caller headers; the caller wins
/// when it names its own content type.
fn merge_headers(
    default_content_type: &str,
    caller: &[(String, String)],
) -> Vec<(String, String)> {
    let caller_has_content_type = caller
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    let mut merged = Vec::with_capacity(caller.len() + 1);
    if !caller_has_content_type {
        merged.push(("Content-Type".to_string(), default_content_type.to_string()));
    }
    merged.extend(caller.iter().cloned());
    merged
}

fn header_value(response: &ureq::http::Response<ureq::Body>, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Extract the filename from a `Content-Disposition` header via the
/// `filename="..."` pattern (unquoted values accepted too).
fn parse_disposition_filename(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let start = lower.find("filename=")? + "filename=".len();
    let rest = &header[start..];
    let name = if let Some(stripped) = rest.strip_prefix('"') {
        stripped.split('"').next().unwrap_or("")
    } else {
        rest.split(';').next().unwrap_or("").trim()
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Percent-encode a query parameter value (spaces → %20, etc.).
pub(crate) fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(ch),
            ' ' => out.push_str("%20"),
            _ => {
                for byte in ch.to_string().as_bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trims_trailing_slash() {
        let gateway = ApiGateway::new("http://localhost:8000/api/");
        assert_eq!(gateway.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn backend_origin_derives_from_the_base_url() {
        let gateway = ApiGateway::new("https://api.example.com/api/");
        assert_eq!(gateway.backend_origin(), "https://api.example.com");

        let overridden = gateway.with_backend_origin("https://console.example.com/");
        assert_eq!(overridden.backend_origin(), "https://console.example.com");
    }

    #[test]
    fn merge_keeps_default_content_type_when_caller_silent() {
        let merged = merge_headers("application/json", &[]);
        assert_eq!(
            merged,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn merge_lets_caller_override_content_type() {
        let caller = vec![("content-type".to_string(), "text/plain".to_string())];
        let merged = merge_headers("application/json", &caller);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].1, "text/plain");
    }

    #[test]
    fn token_header_is_empty_without_a_token() {
        assert_eq!(token_header(None).1, "");
        assert_eq!(token_header(Some("abc")).1, "Token abc");
    }

    #[test]
    fn disposition_quoted_filename() {
        assert_eq!(
            parse_disposition_filename(r#"attachment; filename="report_12.zip""#),
            Some("report_12.zip".to_string())
        );
    }

    #[test]
    fn disposition_unquoted_filename() {
        assert_eq!(
            parse_disposition_filename("attachment; filename=report.zip; size=12"),
            Some("report.zip".to_string())
        );
    }

    #[test]
    fn disposition_without_filename_is_none() {
        assert_eq!(parse_disposition_filename("inline"), None);
        assert_eq!(parse_disposition_filename(""), None);
        assert_eq!(parse_disposition_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn urlencoded_escapes_reserved_characters() {
        assert_eq!(urlencoded("plain-value_1.0~x"), "plain-value_1.0~x");
        assert_eq!(urlencoded("a b"), "a%20b");
        assert_eq!(urlencoded("a&b=c"), "a%26b%3Dc");
    }
}
