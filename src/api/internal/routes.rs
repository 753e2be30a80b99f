/*
 * Responsibility
 * - /controller/internal 配下の URL 構造を定義
 * - 全体に access middleware (token 検証), 各 route に role guard を明示的に掛ける
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::internal::handlers::{
    admin::{force_close_scan, suspend_user},
    request_history::{get_request_details, replay_request},
};
use crate::middleware::auth::{access, require_role};
use crate::services::auth::roles::{ADMINAPP_SERVICE, RHAPP_SERVICE};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route(
            "/force-close/{scan_id}",
            require_role(ADMINAPP_SERVICE, post(force_close_scan)),
        )
        .route(
            "/suspend-user/{user_id}",
            require_role(ADMINAPP_SERVICE, post(suspend_user)),
        );

    let request_history = Router::new()
        .route(
            "/requests/{request_id}",
            require_role(RHAPP_SERVICE, get(get_request_details)),
        )
        .route(
            "/requests/{request_id}/replay",
            require_role(RHAPP_SERVICE, post(replay_request)),
        );

    let router = Router::new()
        .nest("/admin", admin)
        .nest("/rh", request_history);

    access::apply(router, state)
}
