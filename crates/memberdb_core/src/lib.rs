//! Connection-scoped member persistence core.
//! This crate owns the storage contract for member records and the
//! connection lifecycle around every operation.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::source::{
    ConnectionHandle, ConnectionSource, DirectConnectionSource, PooledConnectionSource,
    SourceError,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{Member, MemberId, MemberValidationError};
pub use repo::member_repo::{MemberRepository, RepoError, RepoResult, SqliteMemberRepository};
pub use service::member_service::MemberService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
