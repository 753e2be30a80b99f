/*
 * Responsibility
 * - 公開する router の組み立て (/health + /controller/internal)
 */
pub mod health;
pub mod internal;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/controller/internal", internal::routes(state))
}
