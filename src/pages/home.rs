//! Landing page with entry points into the auth flow.

use leptos::prelude::*;

/// Home page — shown to guests; authenticated visitors are redirected to
/// their profile by the route guard before this renders.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <div class="home-card">
                <h1>"Account Portal"</h1>
                <p class="home-card__subtitle">
                    "Manage your account in one place. Sign in to continue, or create a new account."
                </p>
                <div class="home-card__actions">
                    <a href="/login" class="btn btn--primary">
                        "Sign In"
                    </a>
                    <a href="/register" class="btn">
                        "Create Account"
                    </a>
                </div>
            </div>
        </div>
    }
}
