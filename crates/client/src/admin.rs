//! Admin endpoints: Get Started funnel activity, user listing, and
//! dashboard statistics.
//!
//! Unlike the role clients, the admin token is passed explicitly; the
//! admin tooling runs against accounts provisioned outside the normal
//! login flow.

use faranga_core::Role;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::{token_header, urlencoded, ApiGateway, Body, Method};

/// One Get Started funnel event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    #[serde(default)]
    pub events: Vec<ActivityEvent>,
    #[serde(default)]
    pub count: u64,
}

/// A platform account as listed for admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<AdminUser>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCounts {
    #[serde(default)]
    pub farmers: u64,
    #[serde(default)]
    pub microfinance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCounts {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub rejected: u64,
}

/// Dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStats {
    pub users: UserCounts,
    pub applications: ApplicationCounts,
}

/// Admin endpoints with an explicit token.
pub struct AdminClient<'a> {
    gateway: &'a ApiGateway,
    token: String,
}

impl<'a> AdminClient<'a> {
    pub fn new(gateway: &'a ApiGateway, token: &str) -> Self {
        AdminClient {
            gateway,
            token: token.to_string(),
        }
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![token_header(Some(&self.token))]
    }

    /// GET `/admin/activity/?limit=..`
    pub fn activity(&self, limit: u32) -> Result<ActivityResponse, ApiError> {
        let path = format!("/admin/activity/?limit={limit}");
        self.gateway
            .request(Method::Get, &path, &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// GET `/admin/users/?role=..&limit=..`
    pub fn users(&self, role: Option<Role>, limit: u32) -> Result<UsersResponse, ApiError> {
        let mut path = String::from("/admin/users/?");
        if let Some(role) = role {
            path.push_str(&format!("role={}&", urlencoded(role.as_str())));
        }
        path.push_str(&format!("limit={limit}"));
        self.gateway
            .request(Method::Get, &path, &self.auth_headers(), Body::None)?
            .deserialize()
    }

    /// GET `/admin/stats/`
    pub fn stats(&self) -> Result<AdminStats, ApiError> {
        self.gateway
            .request(Method::Get, "/admin/stats/", &self.auth_headers(), Body::None)?
            .deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_deserialize() {
        let body = r#"{
            "users": {"farmers": 120, "microfinance": 7},
            "applications": {"pending": 14, "approved": 52, "rejected": 9}
        }"#;
        let stats: AdminStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.users.farmers, 120);
        assert_eq!(stats.applications.approved, 52);
    }

    #[test]
    fn activity_tolerates_sparse_events() {
        let body = r#"{"events": [{"event_type": "modal_opened"}], "count": 1}"#;
        let activity: ActivityResponse = serde_json::from_str(body).unwrap();
        assert_eq!(activity.events[0].event_type, "modal_opened");
        assert!(activity.events[0].ip_address.is_none());
    }
}
