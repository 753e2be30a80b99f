/*
 * Responsibility
 * - admin 系 (force-close / suspend-user) の response DTO
 * - JSON のキーは camelCase (呼び出し元サービスとの契約)
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceCloseScanResponse {
    pub status: &'static str,
    pub scan_id: String,
    pub closed_by: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendUserResponse {
    pub status: &'static str,
    pub user_id: String,
    pub suspended_by: String,
}
