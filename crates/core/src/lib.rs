//! Domain layer for the invoicing dashboard.
//!
//! Zero internal dependencies so it can be used by the repository layer,
//! the API server, and any future CLI tooling.

pub mod error;
pub mod status;
pub mod types;
pub mod validation;
