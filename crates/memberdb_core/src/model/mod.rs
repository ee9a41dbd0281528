//! Domain model for member records.
//!
//! # Responsibility
//! - Define the canonical member record persisted by the repository layer.
//!
//! # Invariants
//! - Every member is identified by a caller-supplied stable `MemberId`.
//! - The identifier never changes after the record is first persisted.

pub mod member;
