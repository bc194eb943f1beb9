// src/core/error.rs
//! Error taxonomy for the admin API and the moderation workflow

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::job::JobId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("not authenticated or token rejected by server ({0})")]
    Unauthorized(StatusCode),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("no admin token configured")]
    MissingToken,

    #[error("invalid admin token: {0}")]
    InvalidToken(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("server did not acknowledge the action: {0}")]
    NotAcknowledged(String),

    #[error("action already in flight for id {0}")]
    AlreadyProcessing(JobId),

    #[error("job {0} is not loaded")]
    UnknownJob(JobId),

    #[error("company {0} is not in the pending list")]
    UnknownCompany(i64),
}

impl ApiError {
    /// Auth failures are surfaced to the user and never retried
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized(_)
                | ApiError::AccessDenied(_)
                | ApiError::MissingToken
                | ApiError::InvalidToken(_)
        )
    }

    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Unauthorized(status)
        } else {
            ApiError::Status { status, body }
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized(_)
        ));
        assert!(ApiError::from_status(StatusCode::FORBIDDEN, String::new()).is_auth());

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream".to_string());
        assert!(!err.is_auth());
        assert_eq!(err.to_string(), "server returned 502 Bad Gateway: upstream");
    }
}
