use std::fmt;

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Loan application status, ordered by workflow progression.
///
/// The backend owns this enumeration and may grow it; unknown values are
/// preserved in `Other` so that one new status cannot fail an entire list
/// response.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    DocumentsRequested,
    Approved,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// The wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::DocumentsRequested => "documents_requested",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Other(s) => s,
        }
    }

    /// Parse a wire string. Never fails; unrecognized values land in `Other`.
    pub fn parse(s: &str) -> ApplicationStatus {
        match s {
            "pending" => ApplicationStatus::Pending,
            "under_review" => ApplicationStatus::UnderReview,
            "documents_requested" => ApplicationStatus::DocumentsRequested,
            "approved" => ApplicationStatus::Approved,
            "rejected" => ApplicationStatus::Rejected,
            other => ApplicationStatus::Other(other.to_string()),
        }
    }

    /// Statuses an MFI may request via the update-status endpoint.
    pub fn settable() -> [ApplicationStatus; 4] {
        [
            ApplicationStatus::UnderReview,
            ApplicationStatus::DocumentsRequested,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ]
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Approved | ApplicationStatus::Rejected
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(D::Error::custom("empty application status"));
        }
        Ok(ApplicationStatus::parse(&s))
    }
}

/// One entry in an application's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub note: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        for s in [
            "pending",
            "under_review",
            "documents_requested",
            "approved",
            "rejected",
        ] {
            let status = ApplicationStatus::parse(s);
            assert_eq!(status.as_str(), s);
            assert!(!matches!(status, ApplicationStatus::Other(_)));
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = ApplicationStatus::parse("escalated");
        assert_eq!(status, ApplicationStatus::Other("escalated".to_string()));
        assert_eq!(status.as_str(), "escalated");
    }

    #[test]
    fn ordering_follows_workflow() {
        assert!(ApplicationStatus::Pending < ApplicationStatus::UnderReview);
        assert!(ApplicationStatus::UnderReview < ApplicationStatus::Approved);
    }

    #[test]
    fn history_entry_deserializes_with_defaults() {
        let body = r#"{"status": "under_review", "created_at": "2026-03-01T10:00:00"}"#;
        let update: StatusUpdate = serde_json::from_str(body).unwrap();
        assert_eq!(update.status, ApplicationStatus::UnderReview);
        assert!(update.note.is_empty());
        assert!(update.updated_by_name.is_none());
    }

    #[test]
    fn terminal_statuses() {
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!ApplicationStatus::Pending.is_terminal());
    }
}
