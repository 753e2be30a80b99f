/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証・audience・roles の変換は middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

use std::collections::BTreeSet;

use crate::services::auth::{AuthenticatedService, roles::Authority};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `calling_service` は appid / azp から導出した呼び出し元サービス (audit の主体)
/// - `authorities` は `ROLE_` 付きの権限 (role guard が参照する)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub calling_service: String,
    pub authorities: BTreeSet<Authority>,
}

impl AuthCtx {
    pub fn new(calling_service: String, authorities: BTreeSet<Authority>) -> Self {
        Self {
            calling_service,
            authorities,
        }
    }
}

impl From<AuthenticatedService> for AuthCtx {
    fn from(auth: AuthenticatedService) -> Self {
        Self::new(auth.calling_service, auth.authorities)
    }
}
