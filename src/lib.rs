//! # account-portal
//!
//! Leptos + WASM frontend for a username/password account portal: landing
//! page, login, registration, and profile management against a remote JSON
//! API.
//!
//! The interesting core is the session state machine (`state::session`),
//! which reconciles credentials persisted in `localStorage` with the remote
//! API and degrades to a cached demo identity when the API is unreachable,
//! and the route guard (`state::guard`), which decides navigation permission
//! from session state alone.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Client-side hydration entry point, invoked by the WASM loader.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
