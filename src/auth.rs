// src/auth.rs
//! Admin access check performed before any data fetch.
//!
//! The bearer token is issued by the portal's auth service. This client only
//! reads its claims to decide whether to show the console at all; the backend
//! still verifies the signature and rejects anything it does not accept.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::app_log;
use crate::core::error::{ApiError, ApiResult};

const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        let is_admin_role = |value: &str| value.eq_ignore_ascii_case(ADMIN_ROLE);

        self.is_admin.unwrap_or(false)
            || self.role.as_deref().is_some_and(is_admin_role)
            || self.user_type.as_deref().is_some_and(is_admin_role)
            || self.roles.iter().any(|r| is_admin_role(r.as_str()))
    }

    fn subject(&self) -> String {
        self.email
            .clone()
            .or_else(|| self.sub.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// A token whose claims identify an administrator
#[derive(Debug, Clone)]
pub struct AdminSession {
    token: String,
    claims: Claims,
}

impl AdminSession {
    /// Validate that a token is present, unexpired and carries an admin role
    pub fn from_token(token: Option<&str>) -> ApiResult<Self> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken)?;

        let claims = Self::read_claims(token)?;
        if !claims.is_admin() {
            app_log!(warn, "Rejected non-admin session for {}", claims.subject());
            return Err(ApiError::AccessDenied(format!(
                "{} is not an administrator",
                claims.subject()
            )));
        }

        app_log!(info, "Admin session for {}", claims.subject());
        Ok(Self {
            token: token.to_string(),
            claims,
        })
    }

    fn read_claims(token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| ApiError::InvalidToken(e.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> String {
        self.claims.subject()
    }
}
