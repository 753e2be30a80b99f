/*
 * Responsibility
 * - /controller/internal/rh 配下の handler (RHAPP_SERVICE 専用)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::internal::{
        dto::request_history::{ReplayRequestResponse, RequestDetailsResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    services::audit::AuditAction,
    state::AppState,
};

const REQUESTS_PATH: &str = "/controller/internal/rh/requests";

pub async fn get_request_details(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<RequestDetailsResponse>, AppError> {
    let res = RequestDetailsResponse {
        request_id,
        status: "completed",
        retrieved_for: auth.calling_service,
    };

    state.audit.audit(
        &res.retrieved_for,
        &format!("{REQUESTS_PATH}/{}", res.request_id),
        AuditAction::GetRequestDetails.as_str(),
        &res.request_id,
    )?;

    Ok(Json(res))
}

pub async fn replay_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<ReplayRequestResponse>, AppError> {
    let res = ReplayRequestResponse {
        request_id,
        status: "replayed",
        replayed_for: auth.calling_service,
    };

    state.audit.audit(
        &res.replayed_for,
        &format!("{REQUESTS_PATH}/{}/replay", res.request_id),
        AuditAction::ReplayRequest.as_str(),
        &res.request_id,
    )?;

    Ok(Json(res))
}
