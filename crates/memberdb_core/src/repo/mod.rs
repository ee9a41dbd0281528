//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for member records.
//! - Isolate SQL and connection lifecycle details from service callers.
//!
//! # Invariants
//! - Repository writes must enforce `Member::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors.

pub mod member_repo;
