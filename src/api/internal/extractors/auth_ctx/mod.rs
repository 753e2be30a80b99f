/*!
 * Calling-service context extractor
 *
 * Responsibility:
 * - access middleware が検証した呼び出し元サービス（AuthCtx）を handler / role guard に渡す
 * - axum 依存 (FromRequestParts) は core に、型は types に置く
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
