//! Network boundary: wire DTOs and the authentication API client.

pub mod api;
pub mod types;
