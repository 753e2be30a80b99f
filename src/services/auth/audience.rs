//! `aud` check for tokens presented to this resource server.
//!
//! Tokens not intended for this service are rejected outright, before any role is looked at.

use super::access_jwt::VerifiedToken;

pub const INVALID_TOKEN: &str = "invalid_token";
pub const INVALID_AUDIENCE_DESCRIPTION: &str =
    "The token audience does not include the required audience for this resource server";

/// Rejection reason. Fixed text: it never carries the audience values found in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", INVALID_AUDIENCE_DESCRIPTION)]
pub struct AudienceError;

impl AudienceError {
    pub fn code(&self) -> &'static str {
        INVALID_TOKEN
    }

    pub fn description(&self) -> &'static str {
        INVALID_AUDIENCE_DESCRIPTION
    }
}

#[derive(Debug, Clone)]
pub struct AudienceValidator {
    expected: String,
}

impl AudienceValidator {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    // Exact string equality only: no wildcard, prefix or substring matching.
    pub fn validate(&self, token: &VerifiedToken) -> Result<(), AudienceError> {
        match token.audience() {
            Some(aud) if aud.iter().any(|a| *a == self.expected) => Ok(()),
            _ => Err(AudienceError),
        }
    }
}
