/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - token / audience / roles / audit のエラーを統一的に変換
 * - 返すメッセージには claim の値を含めない
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::audit::AuditEventError;
use crate::services::auth::AccessJwtError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{code}: {message}")]
    InvalidToken {
        code: &'static str,
        message: &'static str,
    },
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::InvalidToken { code, message } => {
                (StatusCode::UNAUTHORIZED, code, message.to_string())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccessJwtError> for AppError {
    fn from(e: AccessJwtError) -> Self {
        match e {
            // Fixed text only: the audience values found in the token are never echoed.
            AccessJwtError::Audience(err) => AppError::InvalidToken {
                code: err.code(),
                message: err.description(),
            },
            AccessJwtError::Jwt(_) | AccessJwtError::Roles(_) => AppError::Unauthorized,
        }
    }
}

impl From<AuditEventError> for AppError {
    fn from(e: AuditEventError) -> Self {
        // Caller bug (action invoked without identity/verb), not a client error.
        tracing::error!(error = %e, "audit event rejected at construction");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;
    use crate::services::auth::audience::AudienceError;
    use crate::services::auth::roles::RoleClaimError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn audience_error_maps_to_invalid_token() {
        let (status, body) = render(AccessJwtError::Audience(AudienceError).into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "invalid_token");
        assert_eq!(body["error"]["message"], AudienceError.to_string());
    }

    #[tokio::test]
    async fn malformed_roles_map_to_unauthorized() {
        let err = AccessJwtError::Roles(RoleClaimError::NotAnArray);
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn audit_contract_violation_is_internal() {
        let (status, body) = render(AuditEventError::BlankAction.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn forbidden_body() {
        let (status, body) = render(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "forbidden");
    }
}
