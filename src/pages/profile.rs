//! Profile page: view and edit the authenticated user's details.
//!
//! The server profile is fetched on mount; when the API is unreachable the
//! cached session identity is shown instead with a notice, and edits are
//! applied locally through the session manager so the page stays usable
//! offline.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::net::api::{AuthApi, HttpApi};
use crate::net::types::Identity;

/// The trimmed value, or `None` when blank, for building a patch.
#[cfg(any(test, feature = "hydrate"))]
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Profile page — reachable only through the auth-required route guard.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<crate::state::session::SessionState>>();
    let fetched = LocalResource::new(|| async { HttpApi.get_profile().await });

    let saved_override = RwSignal::new(None::<Identity>);
    let editing = RwSignal::new(false);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    // Server profile when reachable, locally saved edits after a save,
    // cached session identity as the offline fallback.
    let displayed = move || -> Option<(Identity, bool)> {
        if let Some(identity) = saved_override.get() {
            return Some((identity, false));
        }
        match fetched.get() {
            Some(Ok(identity)) => Some((identity, false)),
            Some(Err(_)) => session.get().identity.map(|identity| (identity, true)),
            None => None,
        }
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let patch = crate::net::types::IdentityPatch {
                    email: non_empty(&email.get_untracked()),
                    full_name: non_empty(&full_name.get_untracked()),
                    ..crate::net::types::IdentityPatch::default()
                };
                let saved = HttpApi.update_profile(&patch).await;
                let mut state = session.get_untracked();
                match saved {
                    // The server's response is canonical; adopt it wholesale
                    // rather than re-applying the submitted patch.
                    Ok(updated) => {
                        crate::state::session::adopt_identity(
                            &mut state,
                            &crate::util::storage::BrowserStore,
                            updated,
                        );
                        notice.set("Profile updated successfully!".to_owned());
                    }
                    Err(_) => {
                        crate::state::session::patch_identity(
                            &mut state,
                            &crate::util::storage::BrowserStore,
                            &patch,
                        );
                        notice.set(
                            "Profile updated locally; the server could not be reached.".to_owned(),
                        );
                    }
                }
                saved_override.set(state.identity.clone());
                session.set(state);
                editing.set(false);
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            busy.set(false);
        }
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let mut state = session.get_untracked();
                crate::state::session::logout(
                    &mut state,
                    &HttpApi,
                    &crate::util::storage::BrowserStore,
                )
                .await;
                session.set(state);
                navigate("/", NavigateOptions::default());
            });
        }
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header">
                <h1>"Your Profile"</h1>
                <button class="btn" on:click=on_logout>
                    "Log Out"
                </button>
            </header>

            <Show when=move || !notice.get().is_empty()>
                <p class="auth-message">{move || notice.get()}</p>
            </Show>

            <Suspense fallback=move || view! { <p>"Loading profile..."</p> }>
                {move || {
                    displayed()
                        .map(|(identity, offline)| {
                            let edit_seed = identity.clone();
                            let on_edit = move |_| {
                                full_name.set(edit_seed.full_name.clone().unwrap_or_default());
                                email.set(edit_seed.email.clone().unwrap_or_default());
                                notice.set(String::new());
                                editing.set(true);
                            };
                            view! {
                                <div class="profile-card">
                                    <Show when=move || offline>
                                        <p class="auth-message auth-message--warn">
                                            "Could not fetch profile from server. Showing cached data."
                                        </p>
                                    </Show>

                                    <div class="profile-card__grid">
                                        <div class="profile-card__row">
                                            <span class="profile-card__label">"Full Name"</span>
                                            <p>{not_set(identity.full_name.clone())}</p>
                                        </div>
                                        <div class="profile-card__row">
                                            <span class="profile-card__label">"Username"</span>
                                            <p>{not_set(identity.username.clone())}</p>
                                        </div>
                                        <div class="profile-card__row">
                                            <span class="profile-card__label">"Email"</span>
                                            <p>{not_set(identity.email.clone())}</p>
                                        </div>
                                        <div class="profile-card__row">
                                            <span class="profile-card__label">"Role"</span>
                                            <p>{not_set(identity.role.clone())}</p>
                                        </div>
                                        <div class="profile-card__row">
                                            <span class="profile-card__label">"Member ID"</span>
                                            <p>{identity.id.map_or_else(|| "Not set".to_owned(), |id| id.to_string())}</p>
                                        </div>
                                    </div>

                                    <Show when=move || !editing.get()>
                                        <button class="btn btn--primary" on:click=on_edit.clone()>
                                            "Edit Profile"
                                        </button>
                                    </Show>

                                    <Show when=move || editing.get()>
                                        <form class="auth-form" on:submit=on_save>
                                            <label class="auth-form__label">
                                                "Full Name"
                                                <input
                                                    class="auth-form__input"
                                                    type="text"
                                                    prop:value=move || full_name.get()
                                                    on:input=move |ev| full_name.set(event_target_value(&ev))
                                                />
                                            </label>
                                            <label class="auth-form__label">
                                                "Email"
                                                <input
                                                    class="auth-form__input"
                                                    type="email"
                                                    prop:value=move || email.get()
                                                    on:input=move |ev| email.set(event_target_value(&ev))
                                                />
                                            </label>
                                            <div class="auth-form__actions">
                                                <button class="btn" type="button" on:click=move |_| editing.set(false)>
                                                    "Cancel"
                                                </button>
                                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                                    {move || if busy.get() { "Saving..." } else { "Save Changes" }}
                                                </button>
                                            </div>
                                        </form>
                                    </Show>
                                </div>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Field text for display, with a placeholder for absent values.
fn not_set(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Not set".to_owned())
}
