//! Correlation-Id propagation (`X-Correlation-Id`).
//!
//! Responsibility:
//! - Adopt the caller's `X-Correlation-Id` when it is present and non-blank, otherwise mint one.
//! - Run the rest of the stack inside the task-local correlation scope and a `request` span,
//!   so every log line and audit event for this request carries the id.
//! - Echo the id on every response, including 401/403/408/500.
//!
//! Must be the outermost layer: anything outside it runs without a correlation id.

use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};
use tracing::Instrument;

use crate::services::correlation::{self, CorrelationId};

pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

pub fn apply(router: Router) -> Router {
    router.layer(middleware::from_fn(correlation_middleware))
}

async fn correlation_middleware(req: Request<Body>, next: Next) -> Response {
    // Non-visible-ASCII header values cannot be echoed back, so they count as absent.
    let inbound = req
        .headers()
        .get(&CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let correlation_id = CorrelationId::resolve(inbound);

    let span = tracing::info_span!("request", correlation_id = %correlation_id);
    let mut response =
        correlation::scope(correlation_id.clone(), next.run(req).instrument(span)).await;

    match HeaderValue::from_str(correlation_id.as_str()) {
        Ok(value) => {
            response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        }
        Err(err) => {
            tracing::warn!(error = %err, "correlation id is not a valid header value");
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::error::AppError;

    fn router() -> Router {
        let app = Router::new()
            .route(
                "/echo",
                get(|| async {
                    correlation::current()
                        .map(CorrelationId::into_string)
                        .unwrap_or_default()
                }),
            )
            .route(
                "/fail",
                get(|| async { Err::<(), _>(AppError::Internal) }),
            );
        apply(app)
    }

    async fn call(uri: &str, header: Option<&str>) -> Response {
        let mut req = Request::builder().uri(uri);
        if let Some(value) = header {
            req = req.header("X-Correlation-Id", value);
        }
        router()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn echoed(res: &Response) -> String {
        res.headers()
            .get(&CORRELATION_ID_HEADER)
            .expect("correlation header")
            .to_str()
            .unwrap()
            .to_string()
    }

    async fn body_text(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn inbound_id_is_adopted_and_visible_to_the_handler() {
        let res = call("/echo", Some("upstream-abc")).await;
        assert_eq!(echoed(&res), "upstream-abc");
        assert_eq!(body_text(res).await, "upstream-abc");
    }

    #[tokio::test]
    async fn missing_or_blank_header_gets_a_fresh_uuid() {
        let first = call("/echo", None).await;
        let second = call("/echo", Some("   ")).await;

        let a = echoed(&first);
        let b = echoed(&second);
        assert!(Uuid::parse_str(&a).is_ok());
        assert!(Uuid::parse_str(&b).is_ok());
        assert_ne!(a, b);
        assert_eq!(body_text(first).await, a);
    }

    #[tokio::test]
    async fn failing_handler_still_echoes_and_clears() {
        let res = call("/fail", Some("corr-err")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(echoed(&res), "corr-err");
        assert!(correlation::current().is_none());
    }

    #[tokio::test]
    async fn unmatched_route_is_still_correlated() {
        let res = call("/nope", Some("corr-404")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(echoed(&res), "corr-404");
    }
}
