//! Login page with username/password form and demo-account access.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;
use leptos_router::hooks::use_query_map;

#[cfg(feature = "hydrate")]
use crate::state::guard;
use crate::state::session::{DEMO_PASSWORD, DEMO_USERNAME};

/// Check the login form before any network call.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(())
}

/// Login page — submits credentials through the session manager and resumes
/// the originally requested path on success.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<crate::state::session::SessionState>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let query = use_query_map();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();
    #[cfg(feature = "hydrate")]
    let demo_navigate = navigate.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let username_value = username.get().trim().to_owned();
        let password_value = password.get();
        if let Err(message) = validate_login_input(&username_value, &password_value) {
            error.set(message.to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let resume = guard::resume_target(query.get_untracked().get("from").as_deref());
            leptos::task::spawn_local(async move {
                let mut state = session.get_untracked();
                let result = crate::state::session::login(
                    &mut state,
                    &crate::net::api::HttpApi,
                    &crate::util::storage::BrowserStore,
                    &username_value,
                    &password_value,
                )
                .await;
                session.set(state);
                match result {
                    Ok(_) => navigate(&resume, NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username_value, password_value, query);
            busy.set(false);
        }
    };

    // Try a real login with the demo credentials; fall back to the built-in
    // demo identity when the API is unreachable.
    let on_demo = move |_| {
        if busy.get() {
            return;
        }
        username.set(DEMO_USERNAME.to_owned());
        password.set(DEMO_PASSWORD.to_owned());
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = demo_navigate.clone();
            let resume = guard::resume_target(query.get_untracked().get("from").as_deref());
            leptos::task::spawn_local(async move {
                let mut state = session.get_untracked();
                let result = crate::state::session::login(
                    &mut state,
                    &crate::net::api::HttpApi,
                    &crate::util::storage::BrowserStore,
                    DEMO_USERNAME,
                    DEMO_PASSWORD,
                )
                .await;
                if result.is_err() {
                    leptos::logging::log!("auth API unreachable, entering demo mode");
                    crate::state::session::demo_login(
                        &mut state,
                        &crate::util::storage::BrowserStore,
                    );
                }
                session.set(state);
                navigate(&resume, NavigateOptions::default());
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Welcome Back"</h1>
                <p class="auth-card__subtitle">"Sign in to your account to continue"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-form__label">
                        "Username or Email"
                        <input
                            class="auth-form__input"
                            type="text"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| {
                                username.set(event_target_value(&ev));
                                error.set(String::new());
                            }
                        />
                    </label>
                    <label class="auth-form__label">
                        "Password"
                        <input
                            class="auth-form__input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                error.set(String::new());
                            }
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <div class="auth-divider"></div>
                <p class="auth-card__subtitle">"Quick access with the demo account:"</p>
                <button class="btn" on:click=on_demo disabled=move || busy.get()>
                    "Try Demo Account"
                </button>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <a href="/register">"Create one"</a>
                </p>
            </div>
        </div>
    }
}
