/*
 * Responsibility
 * - service-to-service 専用 API (/controller/internal 配下)
 * - routes() の re-export
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
