use std::collections::BTreeSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use crate::services::auth::audience::{AudienceError, AudienceValidator};
use crate::services::auth::calling_service::extract_calling_service;
use crate::services::auth::roles::{self, Authority, RoleClaimError};

// Errors returned by access-token verification + claim checks.
#[derive(Debug, thiserror::Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Audience(#[from] AudienceError),

    #[error(transparent)]
    Roles(#[from] RoleClaimError),
}

/// Claim set of a token whose signature and lifetime have already been checked.
///
/// Read-only: the core never mutates or retains it beyond the request.
#[derive(Debug, Clone, Default)]
pub struct VerifiedToken {
    claims: Map<String, Value>,
}

impl VerifiedToken {
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Raw claim value. JSON `null` is reported as absent.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name).filter(|v| !v.is_null())
    }

    pub fn claim_as_str(&self, name: &str) -> Option<&str> {
        self.claim(name).and_then(Value::as_str)
    }

    /// `aud` as a list. A single string counts as a one-element list; non-string entries are skipped.
    pub fn audience(&self) -> Option<Vec<&str>> {
        match self.claim("aud")? {
            Value::String(s) => Some(vec![s.as_str()]),
            Value::Array(arr) => Some(arr.iter().filter_map(Value::as_str).collect()),
            _ => None,
        }
    }
}

/// Outcome of a successful authentication, before it is handed to the HTTP layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedService {
    pub calling_service: String,
    pub authorities: BTreeSet<Authority>,
}

/// Access-token verifier for service-to-service calls.
///
/// - Signature / `exp` / `nbf` / `iss` are checked by jsonwebtoken.
/// - `aud` is intentionally left to [`AudienceValidator`] so the rejection rule stays in one place.
/// - Key material is intentionally not printable via Debug.
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: AudienceValidator,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("audience", &self.audience)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: &str,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
            audience: AudienceValidator::new(audience),
        }
    }

    // Verify signature + lifetime and decode the claim set.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AccessJwtError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(VerifiedToken::from_claims(data.claims))
    }

    /// Verify, then run the claim checks in their fixed order:
    /// audience first (short-circuits), then role conversion, then caller identity.
    ///
    /// This is the entry-point for the access middleware.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedService, AccessJwtError> {
        let verified = self.verify(token)?;
        self.authorize_claims(&verified)
    }

    pub fn authorize_claims(
        &self,
        token: &VerifiedToken,
    ) -> Result<AuthenticatedService, AccessJwtError> {
        self.audience.validate(token)?;
        let authorities = roles::convert(token)?;

        Ok(AuthenticatedService {
            calling_service: extract_calling_service(token),
            authorities,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! HS256 helpers so tests can mint tokens without PEM fixtures.
    use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
    use serde_json::Value;

    use super::AuthService;

    pub const SECRET: &[u8] = b"test-only-shared-secret-for-hs256";
    pub const AUDIENCE: &str = "controller-api";

    pub fn auth_service() -> AuthService {
        AuthService::new(
            DecodingKey::from_secret(SECRET),
            Algorithm::HS256,
            None,
            AUDIENCE,
            0,
        )
    }

    /// Sign `claims`, adding an `exp` ten minutes out unless one is given.
    pub fn sign(mut claims: Value) -> String {
        if let Some(obj) = claims.as_object_mut() {
            obj.entry("exp")
                .or_insert_with(|| Value::from(chrono::Utc::now().timestamp() + 600));
        }
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("sign test token")
    }
}
