use faranga_core::Role;

use crate::gateway::{ApiGateway, Body, Method};

/// Get Started funnel events accepted by the activity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    ModalOpened,
    RegisterClicked,
    LoginClicked,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::ModalOpened => "modal_opened",
            EventType::RegisterClicked => "register_clicked",
            EventType::LoginClicked => "login_clicked",
        }
    }
}

/// POST `/activity/log/` - fire-and-forget analytics. No auth.
///
/// Every failure is swallowed so analytics can never block a user flow.
/// The returned flag reports delivery for tests and is safe to ignore.
pub fn log_event(gateway: &ApiGateway, event_type: EventType, role: Option<Role>) -> bool {
    let body = serde_json::json!({
        "event_type": event_type.as_str(),
        "role": role.map(Role::as_str).unwrap_or(""),
    });
    match gateway.request(Method::Post, "/activity/log/", &[], Body::Json(body)) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("activity event dropped: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_use_backend_names() {
        assert_eq!(EventType::ModalOpened.as_str(), "modal_opened");
        assert_eq!(EventType::RegisterClicked.as_str(), "register_clicked");
        assert_eq!(EventType::LoginClicked.as_str(), "login_clicked");
    }
}
