//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation ID
//! - `Flash`: the pending flash message, if one was set and its signature holds
//!
//! # Examples
//!
//! ```ignore
//! async fn index(correlation_id: CorrelationId, flash: Flash) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, "Rendering index");
//!     flash.message.unwrap_or_default()
//! }
//! ```

use crate::flash::{extract_cookie_value, FlashKey, FLASH_COOKIE_NAME};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Set by [`track_request`](crate::middleware::track_request). Outside that
/// middleware a fresh UUID v4 is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Self>()
            .copied()
            .unwrap_or_else(|| Self(Uuid::new_v4())))
    }
}

/// Pending flash message from the `todo_flash` cookie.
///
/// Reading the message does not clear it; the handler sends the clearing
/// cookie whenever `cookie_present` is set, so a cookie that no longer
/// verifies (for example after a secret rotation) is dropped too.
#[derive(Debug, Clone, Default)]
pub struct Flash {
    /// Verified message, `None` when missing or forged
    pub message: Option<String>,
    /// Whether the request carried a `todo_flash` cookie at all
    pub cookie_present: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    FlashKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = extract_cookie_value(&parts.headers, FLASH_COOKIE_NAME) else {
            return Ok(Self::default());
        };

        let key = FlashKey::from_ref(state);
        let message = key.verify(&raw);
        if message.is_none() {
            tracing::warn!("Ignoring flash cookie with invalid signature");
        }

        Ok(Self {
            message,
            cookie_present: true,
        })
    }
}
