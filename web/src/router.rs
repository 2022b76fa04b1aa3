//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use crate::handlers::{api, health::health_check, metrics::metrics, ui};
use crate::middleware::track_request;
use crate::state::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use kv_todo::TodoBackend;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - Health check and Prometheus scrape endpoint
/// - Browser routes (HTML, redirect after every action)
/// - JSON API under `/api`
///
/// Every response carries an `X-Correlation-ID` header, and every request
/// runs inside an `http_request` span naming its route.
pub fn build_router<B: TodoBackend + 'static>(state: AppState<B>) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/todos", get(api::list_todos::<B>).post(api::create_todo::<B>))
        .route("/todos/clear-completed", post(api::clear_completed::<B>))
        .route("/todos/:id/toggle", post(api::toggle_todo::<B>))
        .route("/todos/:id", axum::routing::delete(api::delete_todo::<B>));

    Router::new()
        // Operational endpoints
        .route("/health", get(health_check::<B>))
        .route("/metrics", get(metrics::<B>))
        // Browser routes
        .route("/", get(ui::index::<B>))
        .route("/add", post(ui::add_todo::<B>))
        .route("/toggle/:id", post(ui::toggle_todo::<B>))
        .route("/delete/:id", post(ui::delete_todo::<B>))
        .route("/clear-completed", post(ui::clear_completed::<B>))
        // API routes under /api prefix
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(track_request))
        .with_state(state)
}
