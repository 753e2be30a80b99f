/// Factory: build `AuthService` from application `Config`.
use std::str::FromStr;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey};

use crate::config::{Config, ConfigError};
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, ConfigError> {
    let algorithm = Algorithm::from_str(&config.access_jwt_algorithm)
        .map_err(|_| ConfigError::Invalid("ACCESS_JWT_ALGORITHM"))?;

    let decoding_key = decoding_key(algorithm, config.access_jwt_public_key_pem.as_bytes())
        .map_err(|e| {
            tracing::warn!(error = %e, ?algorithm, "failed to parse access JWT public key PEM");
            ConfigError::Invalid("ACCESS_JWT_PUBLIC_KEY_PEM")
        })?;

    let auth = AuthService::new(
        decoding_key,
        algorithm,
        config.auth_issuer.as_deref(),
        &config.auth_audience,
        config.access_token_leeway_seconds,
    );

    Ok(Arc::new(auth))
}

// Only asymmetric algorithms: this service verifies tokens, it never shares a signing secret.
fn decoding_key(
    algorithm: Algorithm,
    pem: &[u8],
) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
    match algorithm {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(pem),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
        _ => Err(jsonwebtoken::errors::ErrorKind::InvalidAlgorithm.into()),
    }
}
