//! Route wrapper applying the session-based navigation policy.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::guard::{self, RouteDecision};
use crate::state::session::SessionState;

/// Wraps a routed page and enforces the navigation policy for it.
///
/// Renders a wait state while the session is restoring, navigates away when
/// the policy demands a redirect, and renders children only when the
/// navigation is allowed.
#[component]
pub fn RouteGuard(
    /// Whether the wrapped route requires an authenticated session.
    #[prop(optional)]
    require_auth: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    // Re-evaluate on every session change; navigation is the only effect.
    Effect::new(move || {
        let state = session.get();
        let decision = guard::decide(&state, require_auth, &pathname.get_untracked());
        if let Some(href) = guard::redirect_href(&decision) {
            navigate(&href, NavigateOptions::default());
        }
    });

    let allowed = move || {
        guard::decide(&session.get(), require_auth, &pathname.get_untracked())
            == RouteDecision::Allow
    };

    view! {
        <Show
            when=allowed
            fallback=|| {
                view! {
                    <div class="guard-wait">
                        <p>"Checking authentication..."</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
