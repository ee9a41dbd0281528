//! Member use-case service.
//!
//! # Responsibility
//! - Provide stable member account entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::member::Member;
use crate::repo::member_repo::{MemberRepository, RepoError, RepoResult};

/// Use-case service wrapper for member operations.
pub struct MemberService<R: MemberRepository> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new member with an initial balance.
    pub fn register(&self, member_id: impl Into<String>, money: i64) -> RepoResult<Member> {
        self.repo.save(&Member::new(member_id, money))
    }

    /// Looks up a member by stable ID.
    ///
    /// Returns repository-level not-found or store errors unchanged.
    pub fn get(&self, member_id: &str) -> RepoResult<Member> {
        self.repo.find_by_id(member_id)
    }

    /// Returns the member if present, registering one otherwise.
    ///
    /// A query miss is treated as control flow here; every other failure
    /// kind propagates unchanged.
    pub fn get_or_register(&self, member_id: &str, initial_money: i64) -> RepoResult<Member> {
        match self.repo.find_by_id(member_id) {
            Ok(member) => Ok(member),
            Err(RepoError::NotFound(_)) => self.repo.save(&Member::new(member_id, initial_money)),
            Err(err) => Err(err),
        }
    }

    /// Overwrites a member's balance.
    ///
    /// Completes silently when the member does not exist.
    pub fn set_money(&self, member_id: &str, money: i64) -> RepoResult<()> {
        self.repo.update(member_id, money)
    }

    /// Removes a member record.
    ///
    /// Completes silently when the member does not exist.
    pub fn remove(&self, member_id: &str) -> RepoResult<()> {
        self.repo.delete(member_id)
    }
}
