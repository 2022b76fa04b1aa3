//! Request tracking middleware.
//!
//! Every request gets a [`CorrelationId`]: the one sent in
//! `X-Correlation-ID` when it parses as a UUID, otherwise a fresh v4. The
//! id is stored in the request extensions for the extractor, echoed on the
//! response, and recorded on an `http_request` span together with the
//! matched route and, for per-todo routes, the todo id.

use crate::extractors::CorrelationId;
use axum::{
    extract::{MatchedPath, RawPathParams, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Route parameter naming the todo in `/toggle/:id`, `/delete/:id` and
/// their `/api` counterparts.
const TODO_ID_PARAM: &str = "id";

/// Tag the request with a correlation id and run it inside a span.
///
/// Install with [`axum::middleware::from_fn`] through `Router::layer`, so
/// the matched route and path parameters are already known.
pub async fn track_request(
    matched: Option<MatchedPath>,
    params: Option<RawPathParams>,
    mut req: Request,
    next: Next,
) -> Response {
    let correlation_id = incoming_correlation_id(req.headers()).unwrap_or_else(Uuid::new_v4);
    req.extensions_mut().insert(CorrelationId(correlation_id));

    let route = matched.as_ref().map_or("<unmatched>", MatchedPath::as_str);
    let todo_id = params.as_ref().and_then(|params| {
        params
            .iter()
            .find(|(name, _)| *name == TODO_ID_PARAM)
            .map(|(_, value)| value.to_string())
    });

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %correlation_id,
        method = %req.method(),
        route,
        todo_id = todo_id.as_deref().unwrap_or_default(),
    );

    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

fn incoming_correlation_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}
