// src/types/job.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub type JobId = i64;

pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Who created a job posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorType {
    #[default]
    Company,
    Admin,
    Scraper,
    #[serde(untagged)]
    Other(String),
}

impl CreatorType {
    pub fn as_str(&self) -> &str {
        match self {
            CreatorType::Company => "company",
            CreatorType::Admin => "admin",
            CreatorType::Scraper => "scraper",
            CreatorType::Other(raw) => raw,
        }
    }
}

impl From<&str> for CreatorType {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "company" => CreatorType::Company,
            "admin" => CreatorType::Admin,
            "scraper" => CreatorType::Scraper,
            _ => CreatorType::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for CreatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI-facing moderation state computed from `status` + `approved_by_admin`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivedStatus {
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl DerivedStatus {
    /// Derive the moderation state of a job.
    ///
    /// `inactive` is checked before the `approved_by_admin` rule: the server
    /// marks rejected jobs as inactive and unapproved, and they must not
    /// show up as pending.
    pub fn derive(status: &str, approved_by_admin: bool) -> Self {
        if status == STATUS_PENDING_APPROVAL {
            DerivedStatus::Pending
        } else if status == STATUS_INACTIVE {
            DerivedStatus::Rejected
        } else if !approved_by_admin {
            DerivedStatus::Pending
        } else if status == STATUS_ACTIVE {
            DerivedStatus::Approved
        } else {
            DerivedStatus::Other(status.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DerivedStatus::Pending => "Pending",
            DerivedStatus::Approved => "Approved",
            DerivedStatus::Rejected => "Rejected",
            DerivedStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub approved_by_admin: bool,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub created_by_type: CreatorType,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub application_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    /// Server fields this client has no typed slot for
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    pub fn derived_status(&self) -> DerivedStatus {
        DerivedStatus::derive(&self.status, self.approved_by_admin)
    }

    /// Badge text shown in both the list and the detail view
    pub fn badge(&self) -> String {
        self.derived_status().label().to_string()
    }

    /// Raw JSON value for a field name, typed fields included
    pub fn field_value(&self, name: &str) -> Option<serde_json::Value> {
        use serde_json::Value;

        match name {
            "id" => Some(Value::from(self.id)),
            "title" => Some(Value::from(self.title.clone())),
            "company" => Some(Value::from(self.company.clone())),
            "location" => self.location.clone().map(Value::from),
            "description" => Some(Value::from(self.description.clone())),
            "category" => self.category.clone().map(Value::from),
            "status" => Some(Value::from(self.status.clone())),
            "approved_by_admin" => Some(Value::from(self.approved_by_admin)),
            "created_by_type" => Some(Value::from(self.created_by_type.as_str())),
            "created_at" => Some(Value::from(self.created_at.clone())),
            "view_count" => self.view_count.map(Value::from),
            "application_count" => self.application_count.map(Value::from),
            "admin_notes" => self.admin_notes.clone().map(Value::from),
            other => self.extra.get(other).cloned().filter(|v| !v.is_null()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_status() {
        assert_eq!(
            DerivedStatus::derive("pending_approval", true),
            DerivedStatus::Pending
        );
        assert_eq!(DerivedStatus::derive("active", false), DerivedStatus::Pending);
        assert_eq!(DerivedStatus::derive("draft", false), DerivedStatus::Pending);
        assert_eq!(DerivedStatus::derive("active", true), DerivedStatus::Approved);
        assert_eq!(DerivedStatus::derive("inactive", false), DerivedStatus::Rejected);
        assert_eq!(
            DerivedStatus::derive("expired", true),
            DerivedStatus::Other("expired".to_string())
        );
        assert_eq!(DerivedStatus::derive("expired", true).label(), "expired");
    }

    #[test]
    fn test_job_deserialize_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": 3,
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "Rust services",
            "status": "pending_approval",
            "approved_by_admin": false,
            "created_by_type": "scraper",
            "created_at": "2024-05-01T10:00:00Z",
            "salary_max": 90000
        });

        let job: Job = serde_json::from_value(raw).unwrap();
        assert_eq!(job.created_by_type, CreatorType::Scraper);
        assert_eq!(job.badge(), "Pending");
        assert_eq!(job.field_value("salary_max"), Some(serde_json::json!(90000)));
        assert_eq!(job.field_value("location"), None);
    }

    #[test]
    fn test_null_approval_and_creator_fall_back_to_defaults() {
        let raw = serde_json::json!({
            "id": 8,
            "title": "Data Analyst",
            "status": "active",
            "approved_by_admin": null,
            "created_by_type": null
        });

        let job: Job = serde_json::from_value(raw).unwrap();
        assert!(!job.approved_by_admin);
        assert_eq!(job.created_by_type, CreatorType::Company);
        assert_eq!(job.badge(), "Pending");
    }

    #[test]
    fn test_unknown_creator_type_passes_through() {
        let creator: CreatorType = serde_json::from_str("\"partner\"").unwrap();
        assert_eq!(creator, CreatorType::Other("partner".to_string()));
        assert_eq!(creator.to_string(), "partner");
        assert_eq!(CreatorType::from(" Scraper "), CreatorType::Scraper);
        assert_eq!(CreatorType::from("partner"), creator);
    }
}
