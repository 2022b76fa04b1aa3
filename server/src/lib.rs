//! Server assembly for kv-todo.
//!
//! Wires configuration, the Redis store, metrics and the router together.

pub mod config;

pub use config::{Config, ServerConfig};

use kv_todo::{metrics::install_recorder, RedisTodoStore, TodoService};
use kv_todo_core::environment::{SystemClock, UuidIdGenerator};
use kv_todo_web::{build_router, local_hostname, AppState, FlashKey};
use std::sync::Arc;

/// Connect to Redis and build the application router.
///
/// # Errors
///
/// Returns error if the Redis connection cannot be established.
pub async fn build_app(config: &Config) -> kv_todo::Result<axum::Router> {
    let store = RedisTodoStore::new(&config.redis.url()).await?;
    tracing::info!(redis = %config.redis.url(), "Connected to Redis");

    let metrics = match install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Metrics disabled");
            None
        }
    };

    let service = TodoService::new(store, Arc::new(SystemClock), Arc::new(UuidIdGenerator));
    let state = AppState::new(service, FlashKey::new(&config.session_secret), local_hostname())
        .with_metrics(metrics);

    Ok(build_router(state))
}
