//! access token 検証 → AuthCtx を extensions に入れる
//!
//! 順序は固定:
//! 1. `Authorization: Bearer <jwt>` の取り出し
//! 2. 署名 / exp / nbf / iss の検証 (jsonwebtoken)
//! 3. aud の検証 (不一致ならここで打ち切り、roles は見ない)
//! 4. roles → authorities の変換 (形が不正なら拒否)
//! 5. appid / azp から呼び出し元サービスを決める
//!
//! どの段階で失敗しても handler も audit も実行されない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::internal::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::roles::Authority;
use crate::state::AppState;

/// `/controller/internal/*` に認証を掛けるための middleware を適用する。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let authenticated = match state.auth.authenticate(token) {
        Ok(authenticated) => authenticated,
        Err(err) => {
            // claim の値はログにもレスポンスにも出さない (err の Display は固定文言)
            tracing::warn!(error = %err, "access token rejected");
            return Err(err.into());
        }
    };

    tracing::debug!(
        calling_service = %authenticated.calling_service,
        authorities = ?authenticated
            .authorities
            .iter()
            .map(Authority::as_str)
            .collect::<Vec<_>>(),
        "access token accepted"
    );

    // middleware → extractor / role guard への受け渡し
    req.extensions_mut().insert(AuthCtx::from(authenticated));

    Ok(next.run(req).await)
}
