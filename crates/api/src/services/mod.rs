//! Service layer: orchestration of validation, persistence, audit
//! logging, and cache invalidation for each mutating use case.

pub mod invoices;
