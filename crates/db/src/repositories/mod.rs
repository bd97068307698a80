//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod customer_repo;
pub mod invoice_repo;
pub mod status_log_repo;
pub mod user_repo;

pub use customer_repo::CustomerRepo;
pub use invoice_repo::InvoiceRepo;
pub use status_log_repo::StatusLogRepo;
pub use user_repo::UserRepo;
