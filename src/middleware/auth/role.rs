//! Per-route role guard.
//!
//! Wraps one `MethodRouter` so the handler only runs when the caller's authorities
//! contain `ROLE_<role>`. Must sit behind the access middleware, which provides `AuthCtx`.
//!
//! ```ignore
//! .route("/force-close/{scan_id}", require_role(ADMINAPP_SERVICE, post(force_close_scan)))
//! ```

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::internal::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::roles;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct RequiredRole(pub &'static str);

pub fn require_role(
    role: &'static str,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        RequiredRole(role),
        role_guard,
    ))
}

async fn role_guard(
    State(RequiredRole(role)): State<RequiredRole>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req
        .extensions()
        .get::<AuthCtx>()
        .ok_or(AppError::Unauthorized)?;

    if !roles::has_role(&ctx.authorities, role) {
        tracing::warn!(
            calling_service = %ctx.calling_service,
            required_role = role,
            "missing required role"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
