//! Session state machine: identity + token lifecycle and persistence.
//!
//! ARCHITECTURE
//! ============
//! `SessionState` lives in an `RwSignal` context provided by `App`; all
//! mutation funnels through the free functions here, which take the state by
//! `&mut` plus two capabilities: an [`AuthApi`] implementation and a
//! [`SessionStore`]. Pages copy the state out of the signal, run an
//! operation, and write the result back, so the shared signal never holds a
//! half-applied transition while a network call is in flight.
//!
//! INVARIANT
//! =========
//! `identity` and `token` are both present or both absent at every
//! observable point, in memory and in the store. Operations write or delete
//! the two storage keys together.
//!
//! DEMO MODE
//! =========
//! A token beginning with `demo_` marks a client-only fallback identity.
//! When a login attempt fails and the store holds such a token with a
//! parsable identity, the cached pair is adopted instead of surfacing the
//! failure, so the portal stays usable without a reachable server.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::logging;

use crate::net::api::AuthApi;
use crate::net::types::{AuthResponse, Identity, IdentityPatch, RegisterRequest};
use crate::util::storage::{SessionStore, TOKEN_KEY, USER_KEY};

/// Reserved token prefix marking a client-only demo session.
pub const DEMO_TOKEN_PREFIX: &str = "demo_";
/// Username of the built-in demo account.
pub const DEMO_USERNAME: &str = "demo_user";
/// Password of the built-in demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// Authentication state shared across the whole UI via context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Authenticated principal, absent while anonymous.
    pub identity: Option<Identity>,
    /// Bearer credential; present iff `identity` is present.
    pub token: Option<String>,
    /// True only until the initial restore-from-storage step finishes.
    pub loading: bool,
    /// Message from the most recent failed operation.
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            token: None,
            loading: true,
            last_error: None,
        }
    }
}

impl SessionState {
    /// Whether a session is established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Failure surfaced to callers of `login`/`register`. The payload is the
/// underlying API failure message, passed through verbatim for display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Login was rejected and no demo fallback applied.
    #[error("{0}")]
    LoginFailed(String),
    /// Registration (or its follow-up auto-login) was rejected.
    #[error("{0}")]
    RegisterFailed(String),
}

/// The built-in demo account identity.
#[must_use]
pub fn demo_identity() -> Identity {
    Identity {
        id: Some(1),
        username: Some(DEMO_USERNAME.to_owned()),
        email: Some("demo@example.com".to_owned()),
        full_name: Some("Demo User".to_owned()),
        role: Some("USER".to_owned()),
    }
}

/// Restore a persisted session. Runs once at startup, before any other
/// operation; never calls the remote API.
///
/// A stored pairing that is incomplete or fails to parse is discarded from
/// the store entirely rather than restored half-way. Always ends with
/// `loading` cleared.
pub fn restore(state: &mut SessionState, store: &dyn SessionStore) {
    let token = store.get(TOKEN_KEY);
    let identity = store
        .get(USER_KEY)
        .and_then(|raw| serde_json::from_str::<Identity>(&raw).ok());

    if let (Some(token), Some(identity)) = (token, identity) {
        state.token = Some(token);
        state.identity = Some(identity);
    } else {
        store.remove(TOKEN_KEY);
        store.remove(USER_KEY);
    }
    state.loading = false;
}

/// Log in with a username (or email) and password.
///
/// On success the extracted token/identity pair is persisted and adopted.
/// On failure, a cached demo session is adopted instead when one exists;
/// otherwise `last_error` is set and the failure is returned.
///
/// # Errors
///
/// Returns [`SessionError::LoginFailed`] carrying the API failure message.
pub async fn login<A: AuthApi>(
    state: &mut SessionState,
    api: &A,
    store: &dyn SessionStore,
    username: &str,
    password: &str,
) -> Result<Identity, SessionError> {
    state.last_error = None;

    let failure = match api.login(username, password).await {
        Ok(resp) => match adopt_response(state, store, &resp) {
            Ok(identity) => return Ok(identity),
            Err(message) => message,
        },
        Err(message) => message,
    };

    if let Some((token, identity)) = cached_demo_session(store) {
        logging::log!("auth API unreachable, adopting cached demo session");
        state.token = Some(token);
        state.identity = Some(identity.clone());
        return Ok(identity);
    }

    state.last_error = Some(failure.clone());
    Err(SessionError::LoginFailed(failure))
}

/// Register a new account.
///
/// When the server's response carries no token (registration without
/// login), the submitted credentials are replayed through `AuthApi::login`
/// and that result is adopted. A token-bearing response is adopted
/// directly.
///
/// # Errors
///
/// Returns [`SessionError::RegisterFailed`] carrying the API failure
/// message; the session stays anonymous.
pub async fn register<A: AuthApi>(
    state: &mut SessionState,
    api: &A,
    store: &dyn SessionStore,
    request: &RegisterRequest,
) -> Result<Identity, SessionError> {
    state.last_error = None;

    let outcome = match api.register(request).await {
        Ok(resp) if resp.token.is_none() => match api.login(&request.username, &request.password).await {
            Ok(login_resp) => adopt_response(state, store, &login_resp),
            Err(message) => Err(message),
        },
        Ok(resp) => adopt_response(state, store, &resp),
        Err(message) => Err(message),
    };

    outcome.map_err(|message| {
        state.last_error = Some(message.clone());
        SessionError::RegisterFailed(message)
    })
}

/// Log out. The remote call is best-effort; local state and the store are
/// cleared regardless, so this cannot fail from the caller's perspective.
pub async fn logout<A: AuthApi>(state: &mut SessionState, api: &A, store: &dyn SessionStore) {
    if let Err(message) = api.logout().await {
        logging::warn!("logout request failed: {message}");
    }
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
    state.token = None;
    state.identity = None;
    state.last_error = None;
}

/// Merge a partial identity update over the current identity and persist
/// the merged result. No remote call; a no-op while anonymous.
pub fn patch_identity(state: &mut SessionState, store: &dyn SessionStore, patch: &IdentityPatch) {
    let Some(identity) = state.identity.as_mut() else {
        return;
    };
    patch.apply(identity);
    if let Ok(raw) = serde_json::to_string(identity) {
        store.set(USER_KEY, &raw);
    }
}

/// Replace the current identity with a server-provided one and persist it,
/// so locally cached fields the server canonicalized do not drift. No-op
/// while anonymous.
pub fn adopt_identity(state: &mut SessionState, store: &dyn SessionStore, identity: Identity) {
    if state.token.is_none() {
        return;
    }
    if let Ok(raw) = serde_json::to_string(&identity) {
        store.set(USER_KEY, &raw);
    }
    state.identity = Some(identity);
}

/// Clear the last operation's error message.
pub fn clear_error(state: &mut SessionState) {
    state.last_error = None;
}

/// Install the built-in demo identity with a fresh demo token through a
/// normal state transition, for operating without a reachable server.
pub fn demo_login(state: &mut SessionState, store: &dyn SessionStore) -> Identity {
    let identity = demo_identity();
    adopt(state, store, fresh_demo_token(), identity.clone());
    state.last_error = None;
    identity
}

/// Persist and adopt a token/identity pair as a unit.
fn adopt(state: &mut SessionState, store: &dyn SessionStore, token: String, identity: Identity) {
    if let Ok(raw) = serde_json::to_string(&identity) {
        store.set(TOKEN_KEY, &token);
        store.set(USER_KEY, &raw);
    }
    state.token = Some(token);
    state.identity = Some(identity);
}

/// Adopt an auth response, treating a token-less success as a failure.
fn adopt_response(
    state: &mut SessionState,
    store: &dyn SessionStore,
    resp: &AuthResponse,
) -> Result<Identity, String> {
    let Some(token) = resp.token.clone() else {
        return Err("auth response missing token".to_owned());
    };
    let identity = resp.identity();
    adopt(state, store, token, identity.clone());
    Ok(identity)
}

/// The stored token/identity pair, when the token is demo-tagged and the
/// identity parses.
fn cached_demo_session(store: &dyn SessionStore) -> Option<(String, Identity)> {
    let token = store.get(TOKEN_KEY)?;
    if !token.starts_with(DEMO_TOKEN_PREFIX) {
        return None;
    }
    let identity = serde_json::from_str(&store.get(USER_KEY)?).ok()?;
    Some((token, identity))
}

/// A demo token with a timestamp suffix, so repeated demo logins produce
/// distinct tokens.
fn fresh_demo_token() -> String {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now_ms = js_sys::Date::now() as u64;
        format!("{DEMO_TOKEN_PREFIX}{now_ms}")
    }
    #[cfg(not(feature = "hydrate"))]
    {
        format!("{DEMO_TOKEN_PREFIX}0")
    }
}
