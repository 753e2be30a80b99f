/*
 * Responsibility
 * - /controller/internal/admin 配下の handler (ADMINAPP_SERVICE 専用)
 * - role の判定は routes 側の guard で済んでいる前提
 * - action を実行してから audit を書く (順序を逆にしない)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::internal::{
        dto::admin::{ForceCloseScanResponse, SuspendUserResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    services::audit::AuditAction,
    state::AppState,
};

// audit に残す endpoint は decode 済みの id から組み立てる (resourceId と一致させる)
const FORCE_CLOSE_PATH: &str = "/controller/internal/admin/force-close";
const SUSPEND_USER_PATH: &str = "/controller/internal/admin/suspend-user";

pub async fn force_close_scan(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<ForceCloseScanResponse>, AppError> {
    let res = ForceCloseScanResponse {
        status: "closed",
        scan_id,
        closed_by: auth.calling_service,
    };

    state.audit.audit(
        &res.closed_by,
        &format!("{FORCE_CLOSE_PATH}/{}", res.scan_id),
        AuditAction::ForceCloseScan.as_str(),
        &res.scan_id,
    )?;

    Ok(Json(res))
}

pub async fn suspend_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<SuspendUserResponse>, AppError> {
    let res = SuspendUserResponse {
        status: "suspended",
        user_id,
        suspended_by: auth.calling_service,
    };

    state.audit.audit(
        &res.suspended_by,
        &format!("{SUSPEND_USER_PATH}/{}", res.user_id),
        AuditAction::SuspendUser.as_str(),
        &res.user_id,
    )?;

    Ok(Json(res))
}
