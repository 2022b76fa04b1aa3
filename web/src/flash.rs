//! One-shot flash messages carried in a signed cookie.
//!
//! A browser route that wants to tell the user something sets the cookie on
//! its redirect; the index page reads it once and clears it.
//!
//! Cookie value: `base64url(message) "." base64url(hmac_sha256(secret, message))`.
//! A value whose signature does not verify is ignored.

use axum::{
    http::{
        header::{COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Name of the flash cookie.
pub const FLASH_COOKIE_NAME: &str = "todo_flash";

/// Secret used to sign and verify flash cookies.
#[derive(Clone)]
pub struct FlashKey(Arc<[u8]>);

impl FlashKey {
    /// Wrap a session secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self(Arc::from(secret.as_bytes()))
    }

    /// Encode and sign a message as a cookie value.
    #[must_use]
    pub fn sign(&self, message: &str) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(&self.0).ok()?;
        mac.update(message.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Some(format!("{}.{signature}", URL_SAFE_NO_PAD.encode(message)))
    }

    /// Decode a cookie value, returning the message only if the signature holds.
    #[must_use]
    pub fn verify(&self, value: &str) -> Option<String> {
        let (encoded, signature) = value.split_once('.')?;
        let message = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.0).ok()?;
        mac.update(&message);
        mac.verify_slice(&signature).ok()?;

        String::from_utf8(message).ok()
    }
}

impl std::fmt::Debug for FlashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FlashKey(..)")
    }
}

/// `Set-Cookie` value carrying a signed message.
#[must_use]
pub fn flash_cookie(key: &FlashKey, message: &str) -> Option<String> {
    let value = key.sign(message)?;
    Some(format!(
        "{FLASH_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

/// `Set-Cookie` value that expires the flash cookie.
#[must_use]
pub fn clear_flash_cookie() -> String {
    format!("{FLASH_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Read one cookie from the request's `Cookie` header.
#[must_use]
pub fn extract_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for part in raw.split(';') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        if key.trim() == cookie_name && !value.trim().is_empty() {
            return Some(value.trim().to_string());
        }
    }

    None
}

/// Append a `Set-Cookie` header, dropping values that are not valid header text.
pub fn append_set_cookie_header(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Dropping invalid Set-Cookie value"),
    }
}

/// `303 See Other` back to the index page.
#[must_use]
pub fn redirect_home() -> Response {
    (StatusCode::SEE_OTHER, [(LOCATION, "/")]).into_response()
}

/// `303 See Other` back to the index page, carrying a flash message.
#[must_use]
pub fn redirect_home_with_flash(key: &FlashKey, message: &str) -> Response {
    let mut response = redirect_home();
    match flash_cookie(key, message) {
        Some(cookie) => append_set_cookie_header(&mut response, &cookie),
        None => tracing::warn!("Could not sign flash message"),
    }
    response
}
