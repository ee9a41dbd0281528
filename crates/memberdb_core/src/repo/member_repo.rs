//! Member repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `member` table.
//! - Borrow one connection per operation and release it on every exit path.
//!
//! # Invariants
//! - All values reach SQL as bound parameters, never spliced into the
//!   statement text.
//! - Result columns are mapped by name, not position.
//! - `update`/`delete` complete silently when no row matches; only
//!   `find_by_id` surfaces `NotFound`.
//! - Acquired resources are dropped innermost-first: cursor, statement,
//!   connection handle.

use crate::db::source::{ConnectionHandle, ConnectionSource, SourceError};
use crate::db::DbError;
use crate::model::member::{Member, MemberId, MemberValidationError};
use log::{debug, error, info};
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMBER_SELECT_SQL: &str = "SELECT member_id, money FROM member";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure taxonomy.
///
/// `NotFound` is an expected query miss the caller may branch on;
/// `Source` and `Store` carry the original diagnostic as their source.
#[derive(Debug)]
pub enum RepoError {
    Validation(MemberValidationError),
    NotFound(MemberId),
    Source(SourceError),
    Store(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(member_id) => write!(f, "member not found: member_id={member_id}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Source(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<MemberValidationError> for RepoError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for member CRUD operations.
pub trait MemberRepository {
    fn save(&self, member: &Member) -> RepoResult<Member>;
    fn find_by_id(&self, member_id: &str) -> RepoResult<Member>;
    fn update(&self, member_id: &str, money: i64) -> RepoResult<()>;
    fn delete(&self, member_id: &str) -> RepoResult<()>;
}

/// SQLite-backed member repository.
///
/// Holds only the injected connection source; every operation acquires its
/// own connection and shares no mutable state with concurrent calls.
pub struct SqliteMemberRepository<S: ConnectionSource> {
    source: S,
}

impl<S: ConnectionSource> SqliteMemberRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    fn acquire(&self, op: &'static str) -> RepoResult<ConnectionHandle> {
        self.source.acquire().map_err(|err| {
            error!("event=member_{op} module=repo status=error stage=acquire error={err}");
            RepoError::Source(err)
        })
    }
}

impl<S: ConnectionSource> MemberRepository for SqliteMemberRepository<S> {
    fn save(&self, member: &Member) -> RepoResult<Member> {
        member.validate()?;

        let handle = self.acquire("save")?;
        // Affected-row count is intentionally not surfaced to the caller.
        handle
            .conn()
            .execute(
                "INSERT INTO member (member_id, money) VALUES (?1, ?2);",
                params![member.member_id.as_str(), member.money],
            )
            .map_err(|err| store_error("save", &member.member_id, err))?;

        debug!(
            "event=member_save module=repo status=ok member_id={}",
            member.member_id
        );
        Ok(member.clone())
    }

    fn find_by_id(&self, member_id: &str) -> RepoResult<Member> {
        let handle = self.acquire("find")?;
        let conn = handle.conn();

        let mut stmt = conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE member_id = ?1;"))
            .map_err(|err| store_error("find", member_id, err))?;
        let mut rows = stmt
            .query(params![member_id])
            .map_err(|err| store_error("find", member_id, err))?;

        // The PRIMARY KEY on member_id admits at most one row; the first
        // cursor row is taken.
        match rows
            .next()
            .map_err(|err| store_error("find", member_id, err))?
        {
            Some(row) => {
                let member =
                    parse_member_row(row).map_err(|err| store_error("find", member_id, err))?;
                Ok(member)
            }
            None => {
                info!("event=member_find module=repo status=miss member_id={member_id}");
                Err(RepoError::NotFound(member_id.to_string()))
            }
        }
    }

    fn update(&self, member_id: &str, money: i64) -> RepoResult<()> {
        let handle = self.acquire("update")?;
        let changed = handle
            .conn()
            .execute(
                "UPDATE member SET money = ?1 WHERE member_id = ?2;",
                params![money, member_id],
            )
            .map_err(|err| store_error("update", member_id, err))?;

        // Zero matched rows is a silent no-op, not an error.
        debug!("event=member_update module=repo status=ok member_id={member_id} changed={changed}");
        Ok(())
    }

    fn delete(&self, member_id: &str) -> RepoResult<()> {
        let handle = self.acquire("delete")?;
        let changed = handle
            .conn()
            .execute(
                "DELETE FROM member WHERE member_id = ?1;",
                params![member_id],
            )
            .map_err(|err| store_error("delete", member_id, err))?;

        // Zero matched rows is a silent no-op, not an error.
        debug!("event=member_delete module=repo status=ok member_id={member_id} changed={changed}");
        Ok(())
    }
}

fn parse_member_row(row: &Row<'_>) -> Result<Member, rusqlite::Error> {
    Ok(Member {
        member_id: row.get("member_id")?,
        money: row.get("money")?,
    })
}

fn store_error(op: &str, member_id: &str, err: rusqlite::Error) -> RepoError {
    error!("event=member_{op} module=repo status=error member_id={member_id} error={err}");
    RepoError::Store(DbError::Sqlite(err))
}
