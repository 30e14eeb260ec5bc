//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, busy gating,
//! session operation calls) and keeps validation logic in pure helpers so
//! it stays unit-testable without a browser.

pub mod home;
pub mod login;
pub mod profile;
pub mod register;
