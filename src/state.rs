/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: token 検証 + audience / roles / 呼び出し元の解決
 *   - audit: audit line の書き出し
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - request ごとの状態 (correlation id, AuthCtx) はここに置かない
 */
use std::sync::Arc;

use crate::services::{audit::AuditService, auth::AuthService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub audit: Arc<AuditService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, audit: Arc<AuditService>) -> Self {
        Self { auth, audit }
    }
}
