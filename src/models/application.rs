use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::career::CareerCategory;
use crate::utils::time::deserialize_optional_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Viewed,
    Accepted,
    Rejected,
    /// A status this client does not recognise.
    Unknown,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Under Review",
            ApplicationStatus::Viewed => "Viewed",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Unknown => "Unknown",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// A missing status is pending; an unrecognised one is kept as unknown.
impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("viewed") => ApplicationStatus::Viewed,
            Some("accepted") => ApplicationStatus::Accepted,
            Some("rejected") => ApplicationStatus::Rejected,
            None | Some("pending") => ApplicationStatus::Pending,
            Some(_) => ApplicationStatus::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<CareerCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(default, alias = "fullName")]
    pub full_name: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "cvPath")]
    pub cv_path: String,
    #[serde(default, alias = "documentPath")]
    pub document_path: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "careerId")]
    pub career_id: i64,
    #[serde(default)]
    pub career: Option<CareerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_history_summary_in_camel_case() {
        let app: Application = serde_json::from_value(json!({
            "id": 11,
            "careerId": 4,
            "status": "viewed",
            "createdAt": "2026-05-01T08:00:00Z",
            "career": {
                "id": 4,
                "title": "Backend Engineer",
                "location": "Remote",
                "category": { "id": 1, "name": "Engineering" }
            }
        }))
        .unwrap();
        assert_eq!(app.career_id, 4);
        assert_eq!(app.status, ApplicationStatus::Viewed);
        assert_eq!(app.full_name, "");
        assert_eq!(app.career.unwrap().title, "Backend Engineer");
    }

    #[test]
    fn decodes_full_record_in_snake_case() {
        let app: Application = serde_json::from_value(json!({
            "id": 2,
            "full_name": "Ada Lovelace",
            "phone_number": "5551234567",
            "email": "ada@example.com",
            "cv_path": "uploads/cv.pdf",
            "document_path": null,
            "status": "accepted",
            "created_at": "2026-05-01T08:00:00.5",
            "career_id": 8
        }))
        .unwrap();
        assert_eq!(app.full_name, "Ada Lovelace");
        assert!(app.status.is_final());
        assert!(app.career.is_none());
    }

    #[test]
    fn unrecognised_status_is_unknown_not_under_review() {
        let app: Application =
            serde_json::from_value(json!({ "id": 1, "career_id": 1, "status": "archived" })).unwrap();
        assert_eq!(app.status, ApplicationStatus::Unknown);
        assert_eq!(app.status.to_string(), "Unknown");
        assert!(!app.status.is_final());
    }

    #[test]
    fn missing_or_null_status_is_pending() {
        let missing: Application =
            serde_json::from_value(json!({ "id": 1, "career_id": 1 })).unwrap();
        let null: Application =
            serde_json::from_value(json!({ "id": 2, "career_id": 1, "status": null })).unwrap();
        assert_eq!(missing.status, ApplicationStatus::Pending);
        assert_eq!(null.status.to_string(), "Under Review");
    }
}
