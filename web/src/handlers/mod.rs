//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by surface.

pub mod api;
pub mod health;
pub mod metrics;
pub mod ui;

// Re-export common handler utilities
pub use health::health_check;
