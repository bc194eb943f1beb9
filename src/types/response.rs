// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::{company::Company, job::Job};

// ===== Backend Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct JobSearchResponse {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingCompaniesResponse {
    #[serde(default)]
    pub companies: Vec<Company>,
}

/// Acknowledgment returned by every approve/reject endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ===== Request Bodies =====

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ModerationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}
