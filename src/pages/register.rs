//! Registration page with client-side form validation.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

#[cfg(feature = "hydrate")]
use crate::net::types::RegisterRequest;
#[cfg(feature = "hydrate")]
use crate::state::guard::PROFILE_PATH;

/// Check the registration form before any network call. Mirrors the
/// server's minimum requirements so obvious mistakes never leave the
/// browser.
pub(crate) fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), &'static str> {
    if username.trim().len() < 3 {
        return Err("Username must be at least 3 characters long.");
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid email address.");
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters long.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}

/// Loose structural email check: non-empty local part, dotted domain, no
/// whitespace. Real validation is the server's job.
fn looks_like_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

/// Registration page — validates locally, registers through the session
/// manager, and lands on the profile page.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<crate::state::session::SessionState>>();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
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
        let email_value = email.get().trim().to_owned();
        let full_name_value = full_name.get().trim().to_owned();
        let password_value = password.get();
        let confirm_value = confirm.get();
        if let Err(message) =
            validate_registration(&username_value, &email_value, &password_value, &confirm_value)
        {
            error.set(message.to_owned());
            return;
        }
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let request = RegisterRequest {
                    username: username_value,
                    email: email_value,
                    password: password_value,
                    full_name: (!full_name_value.is_empty()).then_some(full_name_value),
                };
                let mut state = session.get_untracked();
                let result = crate::state::session::register(
                    &mut state,
                    &crate::net::api::HttpApi,
                    &crate::util::storage::BrowserStore,
                    &request,
                )
                .await;
                session.set(state);
                match result {
                    Ok(_) => navigate(PROFILE_PATH, NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username_value, email_value, full_name_value, password_value);
            busy.set(false);
        }
    };

    // Skip registration entirely and enter with the built-in demo account.
    // Unlike the login page this never attempts a network call.
    let on_demo = move |_| {
        if busy.get() {
            return;
        }
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = demo_navigate.clone();
            let mut state = session.get_untracked();
            crate::state::session::demo_login(&mut state, &crate::util::storage::BrowserStore);
            session.set(state);
            navigate(PROFILE_PATH, NavigateOptions::default());
        }
    };

    let field = move |label: &'static str,
                      kind: &'static str,
                      signal: RwSignal<String>| {
        view! {
            <label class="auth-form__label">
                {label}
                <input
                    class="auth-form__input"
                    type=kind
                    prop:value=move || signal.get()
                    on:input=move |ev| {
                        signal.set(event_target_value(&ev));
                        error.set(String::new());
                    }
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create Account"</h1>
                <p class="auth-card__subtitle">"A few details and you're in"</p>
                <form class="auth-form" on:submit=on_submit>
                    {field("Username", "text", username)}
                    {field("Email", "email", email)}
                    {field("Full Name (optional)", "text", full_name)}
                    {field("Password", "password", password)}
                    {field("Confirm Password", "password", confirm)}
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <div class="auth-divider"></div>
                <p class="auth-card__subtitle">"In a hurry? No account needed:"</p>
                <button class="btn" on:click=on_demo disabled=move || busy.get()>
                    "Skip & Use Demo Account"
                </button>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
