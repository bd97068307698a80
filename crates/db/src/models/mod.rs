//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any list/query DTOs that row participates in.

pub mod customer;
pub mod invoice;
pub mod status_log;
pub mod user;
