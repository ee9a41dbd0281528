//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical member record (`member_id` + `money`).
//! - Provide validation used by every repository write path.
//!
//! # Invariants
//! - `member_id` is stable: once a member is persisted the identifier is
//!   never rewritten, only the scalar fields change.
//! - Write paths must call `Member::validate()` before SQL mutations.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a member record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemberId = String;

/// Upper bound for identifier length accepted by write paths.
pub const MAX_MEMBER_ID_CHARS: usize = 128;

/// Canonical member record.
///
/// The identifier is supplied by the caller; the repository never generates
/// one. `money` is the single mutable scalar and is kept as `i64` so large
/// balances do not overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Caller-supplied stable ID, unique per stored row.
    pub member_id: MemberId,
    /// Current balance in the smallest currency unit.
    pub money: i64,
}

/// Validation failures raised before any SQL mutation is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyMemberId,
    MemberIdTooLong { length: usize },
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMemberId => write!(f, "member_id must not be empty"),
            Self::MemberIdTooLong { length } => write!(
                f,
                "member_id length {length} exceeds maximum {MAX_MEMBER_ID_CHARS}"
            ),
        }
    }
}

impl Error for MemberValidationError {}

impl Member {
    /// Creates a member record with the given identifier and balance.
    pub fn new(member_id: impl Into<MemberId>, money: i64) -> Self {
        Self {
            member_id: member_id.into(),
            money,
        }
    }

    /// Checks the record against write-path invariants.
    ///
    /// # Errors
    /// - `EmptyMemberId` when the identifier is empty or all whitespace.
    /// - `MemberIdTooLong` when the identifier exceeds `MAX_MEMBER_ID_CHARS`.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.member_id.trim().is_empty() {
            return Err(MemberValidationError::EmptyMemberId);
        }

        let length = self.member_id.chars().count();
        if length > MAX_MEMBER_ID_CHARS {
            return Err(MemberValidationError::MemberIdTooLong { length });
        }

        Ok(())
    }
}
