//! SQLite store bootstrap, schema migration, and connection sourcing.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the member store.
//! - Apply schema migrations in deterministic order.
//! - Hand out per-operation connections through [`source::ConnectionSource`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No member data is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod migrations;
mod open;
pub mod source;

pub use open::{open_db, open_db_in_memory};

/// Lock wait applied to every connection handed out by this module.
pub(crate) const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
