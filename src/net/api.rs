//! REST API client for the authentication backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against same-origin
//! `/api` endpoints, attaching a bearer header whenever the store holds a
//! token. Server-side (SSR): stubs returning errors since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures surface as plain `String` messages. The server's own
//! `message`/`error` JSON fields pass through verbatim so the UI can show
//! server-provided reasons; only when the body carries neither does the
//! client fall back to a status-based message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthResponse, Identity, IdentityPatch, RegisterRequest};

/// Authentication API capability consumed by the session state machine.
///
/// Implemented by [`HttpApi`] in the browser and by in-memory fakes in
/// tests. All methods resolve on the single UI thread; futures need not be
/// `Send`.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange credentials for a token-bearing auth response.
    ///
    /// # Errors
    ///
    /// Returns the server's failure message verbatim when the request is
    /// rejected or the transport fails.
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, String>;

    /// Create an account. The response may or may not carry a token,
    /// depending on whether the server logs the user in on registration.
    ///
    /// # Errors
    ///
    /// Returns the server's failure message verbatim.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, String>;

    /// Invalidate the server-side session. Callers treat this as
    /// best-effort and may ignore failures.
    ///
    /// # Errors
    ///
    /// Returns the server's failure message verbatim.
    async fn logout(&self) -> Result<(), String>;

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns the server's failure message verbatim.
    async fn get_profile(&self) -> Result<Identity, String>;

    /// Apply a partial profile update, returning the updated identity.
    ///
    /// # Errors
    ///
    /// Returns the server's failure message verbatim.
    async fn update_profile(&self, patch: &IdentityPatch) -> Result<Identity, String>;
}

/// [`AuthApi`] implementation over the same-origin JSON API.
pub struct HttpApi;

impl AuthApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "password": password });
            post_json("/api/auth/login", &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(NOT_AVAILABLE.to_owned())
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::to_value(request).map_err(|e| e.to_string())?;
            post_json("/api/auth/register", &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(NOT_AVAILABLE.to_owned())
        }
    }

    async fn logout(&self) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = with_bearer(gloo_net::http::Request::post("/api/auth/logout"))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if resp.ok() {
                Ok(())
            } else {
                let body = resp.json::<ErrorBody>().await.ok();
                Err(failure_message(resp.status(), body))
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(NOT_AVAILABLE.to_owned())
        }
    }

    async fn get_profile(&self) -> Result<Identity, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = with_bearer(gloo_net::http::Request::get("/api/user/profile"))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            decode(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(NOT_AVAILABLE.to_owned())
        }
    }

    async fn update_profile(&self, patch: &IdentityPatch) -> Result<Identity, String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::to_value(patch).map_err(|e| e.to_string())?;
            let resp = with_bearer(gloo_net::http::Request::put("/api/user/profile"))
                .json(&payload)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            decode(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = patch;
            Err(NOT_AVAILABLE.to_owned())
        }
    }
}

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

/// Attach `Authorization: Bearer <token>` when the store holds a token.
#[cfg(feature = "hydrate")]
fn with_bearer(request: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    use crate::util::storage::{BrowserStore, SessionStore, TOKEN_KEY};

    match BrowserStore.get(TOKEN_KEY) {
        Some(token) => request.header("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

#[cfg(feature = "hydrate")]
async fn post_json(url: &str, payload: &serde_json::Value) -> Result<AuthResponse, String> {
    let resp = with_bearer(gloo_net::http::Request::post(url))
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode(resp).await
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, String> {
    if !resp.ok() {
        let body = resp.json::<ErrorBody>().await.ok();
        return Err(failure_message(resp.status(), body));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

/// Error body shape the server uses for rejected requests.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Server-provided failure message, falling back to the HTTP status.
#[cfg(any(test, feature = "hydrate"))]
fn failure_message(status: u16, body: Option<ErrorBody>) -> String {
    body.and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| format!("request failed: {status}"))
}
