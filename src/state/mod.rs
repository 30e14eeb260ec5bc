//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the authentication state machine and is the only module
//! that mutates session state or the persistent store. `guard` is a pure
//! decision layer over that state; the Leptos `RouteGuard` component applies
//! its verdicts.

pub mod guard;
pub mod session;
