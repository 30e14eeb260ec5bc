//! Browser-environment glue shared across pages and components.

pub mod storage;
