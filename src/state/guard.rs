//! Route-guard policy: navigation permission from session state.
//!
//! DESIGN
//! ======
//! `decide` is a total function over `(session, requires_auth, requested)`
//! with four mutually exclusive branches and no I/O. The Leptos
//! `RouteGuard` component applies the verdict; nothing here touches the
//! router or the network.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::session::SessionState;

/// Path of the login page, the redirect target for unauthenticated access.
pub const LOGIN_PATH: &str = "/login";
/// Default destination for authenticated users leaving guest-only pages.
pub const PROFILE_PATH: &str = "/profile";

/// Verdict for a navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restore has not finished; render a wait state, do not
    /// navigate.
    Pending,
    /// The navigation is permitted.
    Allow,
    /// Navigate to `to` instead; `resume` carries the originally requested
    /// path so it can be returned to after login.
    Redirect {
        /// Redirect target path.
        to: &'static str,
        /// Originally requested path, when worth resuming.
        resume: Option<String>,
    },
}

/// Decide whether navigating to a route with the given auth requirement is
/// permitted under the current session state.
#[must_use]
pub fn decide(session: &SessionState, requires_auth: bool, requested: &str) -> RouteDecision {
    if session.loading {
        RouteDecision::Pending
    } else if requires_auth && !session.is_authenticated() {
        let resume = (!requested.is_empty() && requested != LOGIN_PATH).then(|| requested.to_owned());
        RouteDecision::Redirect {
            to: LOGIN_PATH,
            resume,
        }
    } else if !requires_auth && session.is_authenticated() {
        RouteDecision::Redirect {
            to: PROFILE_PATH,
            resume: None,
        }
    } else {
        RouteDecision::Allow
    }
}

/// The href to navigate to for a redirect verdict, with the resume path in
/// the `from` query parameter; `None` for `Pending`/`Allow`.
#[must_use]
pub fn redirect_href(decision: &RouteDecision) -> Option<String> {
    match decision {
        RouteDecision::Redirect {
            to,
            resume: Some(from),
        } => Some(format!("{to}?from={from}")),
        RouteDecision::Redirect { to, resume: None } => Some((*to).to_owned()),
        RouteDecision::Pending | RouteDecision::Allow => None,
    }
}

/// The path to continue to after a successful login: the guard-provided
/// `from` parameter when it names an in-app path, the profile page
/// otherwise.
#[must_use]
pub fn resume_target(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') => path.to_owned(),
        _ => PROFILE_PATH.to_owned(),
    }
}
