/*
 * Responsibility
 * - middleware の公開インターフェース
 * - correlation (X-Correlation-Id), http (timeout/limit/trace), auth (access + role guard)
 */
pub mod auth;
pub mod correlation;
pub mod http;
