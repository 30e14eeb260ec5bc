//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::pages::{home::HomePage, login::LoginPage, profile::ProfilePage, register::RegisterPage};
use crate::state::session::SessionState;
use crate::util::storage::BrowserStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared session context, restores any persisted session
/// before guarded navigation becomes decidable, and sets up client-side
/// routing with per-route guards.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    provide_context(session);

    // Restore persisted credentials once, on the client. Until this runs
    // the session stays `loading` and every guard verdict is Pending.
    Effect::new(move || {
        if session.get_untracked().loading {
            session.update(|state| crate::state::session::restore(state, &BrowserStore));
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/account-portal.css"/>
        <Title text="Account Portal"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route
                    path=StaticSegment("")
                    view=|| {
                        view! {
                            <RouteGuard>
                                <HomePage/>
                            </RouteGuard>
                        }
                    }
                />
                <Route
                    path=StaticSegment("login")
                    view=|| {
                        view! {
                            <RouteGuard>
                                <LoginPage/>
                            </RouteGuard>
                        }
                    }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| {
                        view! {
                            <RouteGuard>
                                <RegisterPage/>
                            </RouteGuard>
                        }
                    }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| {
                        view! {
                            <RouteGuard require_auth=true>
                                <ProfilePage/>
                            </RouteGuard>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
