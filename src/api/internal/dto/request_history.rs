/*
 * Responsibility
 * - request history (rh) 系の response DTO
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetailsResponse {
    pub request_id: String,
    pub status: &'static str,
    pub retrieved_for: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRequestResponse {
    pub request_id: String,
    pub status: &'static str,
    pub replayed_for: String,
}
