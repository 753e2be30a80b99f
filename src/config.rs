/*
 * Responsibility
 * - 環境変数や設定の読み込み (AUTH_AUDIENCE, 公開鍵, audit sink, HTTP 制限など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSinkKind {
    Tracing,
    Stdout,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub auth_audience: String,
    pub auth_issuer: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub access_jwt_algorithm: String,
    pub access_jwt_public_key_pem: String,

    pub audit_sink: AuditSinkKind,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production, a map in tests).
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = parse_or(&var, "PORT", 8080)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let auth_audience = var("AUTH_AUDIENCE")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_issuer = var("AUTH_ISSUER").filter(|s| !s.trim().is_empty());

        let access_token_leeway_seconds = parse_or(&var, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let access_jwt_algorithm = var("ACCESS_JWT_ALGORITHM").unwrap_or_else(|| "RS256".into());

        let access_jwt_public_key_pem = var("ACCESS_JWT_PUBLIC_KEY_PEM")
            .ok_or(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let audit_sink = match var("AUDIT_SINK")
            .unwrap_or_else(|| "tracing".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "tracing" | "log" => AuditSinkKind::Tracing,
            "stdout" => AuditSinkKind::Stdout,
            _ => return Err(ConfigError::Invalid("AUDIT_SINK")),
        };

        let request_timeout =
            Duration::from_secs(parse_or(&var, "REQUEST_TIMEOUT_SECONDS", 30)?);

        let request_body_limit_bytes = parse_or(&var, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            auth_audience,
            auth_issuer,
            access_token_leeway_seconds,
            access_jwt_algorithm,
            access_jwt_public_key_pem,
            audit_sink,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

// Unset → default. Set but unparsable → error (a typo should not silently fall back).
fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
    }
}
