//! Per-operation connection sourcing.
//!
//! # Responsibility
//! - Define the [`ConnectionSource`] contract the repository layer borrows
//!   its connections through.
//! - Wrap pooled and directly opened connections in a single-use
//!   [`ConnectionHandle`] whose release is guaranteed on every exit path.
//!
//! # Invariants
//! - A handle is owned by exactly one call stack and never outlives the
//!   operation that acquired it.
//! - Release is driven by `Drop`: it runs on success, on expected-miss, and
//!   while an error is propagating.
//! - A failure during release is logged and swallowed; it never replaces the
//!   primary failure already in flight.

use crate::db::open::{configure_connection, open_db};
use crate::db::DbError;
use log::{debug, error, warn};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures raised while obtaining (or constructing a source of) connections.
#[derive(Debug)]
pub enum SourceError {
    /// No pooled connection became available within the acquire timeout.
    Exhausted(r2d2::Error),
    /// A fresh connection could not be opened or configured.
    Connect(rusqlite::Error),
    /// The pool itself could not be constructed.
    Build(r2d2::Error),
    /// Store bootstrap (pragmas/migrations) failed.
    Db(DbError),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted(err) => write!(f, "no connection available: {err}"),
            Self::Connect(err) => write!(f, "failed to open connection: {err}"),
            Self::Build(err) => write!(f, "failed to build connection pool: {err}"),
            Self::Db(err) => write!(f, "store bootstrap failed: {err}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Exhausted(err) | Self::Build(err) => Some(err),
            Self::Connect(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

/// Yields one live connection per repository operation.
///
/// Implementations are injected into the repository at construction; the
/// repository never looks a source up globally and never retries a failed
/// acquire.
pub trait ConnectionSource {
    fn acquire(&self) -> SourceResult<ConnectionHandle>;
}

#[derive(Debug)]
enum HandleInner {
    Pooled(PooledConnection<SqliteConnectionManager>),
    Owned(Connection),
}

/// Opaque single-use connection resource.
///
/// Borrowed for the duration of one repository operation. Dropping the
/// handle releases the underlying resource: pooled connections return to
/// their pool, owned connections are closed. Subordinate statements and
/// cursors must be scoped inside the handle's lifetime so they are dropped
/// first.
#[derive(Debug)]
pub struct ConnectionHandle {
    inner: Option<HandleInner>,
}

impl ConnectionHandle {
    fn pooled(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self {
            inner: Some(HandleInner::Pooled(conn)),
        }
    }

    fn owned(conn: Connection) -> Self {
        Self {
            inner: Some(HandleInner::Owned(conn)),
        }
    }

    /// Borrows the live connection.
    pub fn conn(&self) -> &Connection {
        match self.inner.as_ref() {
            Some(HandleInner::Pooled(conn)) => &**conn,
            Some(HandleInner::Owned(conn)) => conn,
            // `inner` is vacated only inside `drop`, after which no borrow
            // of the handle can exist.
            None => unreachable!("connection handle used after release"),
        }
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        match self.inner.take() {
            Some(HandleInner::Pooled(conn)) => {
                drop(conn);
                debug!("event=conn_release module=source status=ok kind=pooled");
            }
            Some(HandleInner::Owned(conn)) => match conn.close() {
                Ok(()) => {
                    debug!("event=conn_release module=source status=ok kind=direct");
                }
                Err((_conn, err)) => {
                    warn!("event=conn_release module=source status=error kind=direct error={err}");
                }
            },
            None => {}
        }
    }
}

/// Bounded connection pool over a SQLite file.
///
/// The constructor bootstraps pragmas and schema once; afterwards `acquire`
/// only checks a connection out of the pool. Exceeding the pool for longer
/// than the acquire timeout surfaces as [`SourceError::Exhausted`].
#[derive(Clone)]
pub struct PooledConnectionSource {
    pool: Pool<SqliteConnectionManager>,
}

impl PooledConnectionSource {
    pub fn open(
        db_path: impl AsRef<Path>,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> SourceResult<Self> {
        let db_path = db_path.as_ref();

        // Schema must exist before the pool hands out its first connection.
        let bootstrap = open_db(db_path).map_err(SourceError::Db)?;
        drop(bootstrap);

        let manager = SqliteConnectionManager::file(db_path).with_init(configure_connection);
        let pool = Pool::builder()
            .max_size(max_connections)
            .connection_timeout(acquire_timeout)
            .build(manager)
            .map_err(|err| {
                error!("event=source_open module=source status=error kind=pooled error={err}");
                SourceError::Build(err)
            })?;

        debug!(
            "event=source_open module=source status=ok kind=pooled max_connections={max_connections}"
        );
        Ok(Self { pool })
    }
}

impl ConnectionSource for PooledConnectionSource {
    fn acquire(&self) -> SourceResult<ConnectionHandle> {
        let conn = self.pool.get().map_err(|err| {
            error!("event=conn_acquire module=source status=error kind=pooled error={err}");
            SourceError::Exhausted(err)
        })?;

        debug!("event=conn_acquire module=source status=ok kind=pooled");
        Ok(ConnectionHandle::pooled(conn))
    }
}

/// Opens a fresh connection for every acquire.
///
/// Suited to ad hoc callers that cannot hold a pool; each handle owns its
/// connection outright and closes it on release.
#[derive(Clone)]
pub struct DirectConnectionSource {
    db_path: PathBuf,
}

impl DirectConnectionSource {
    pub fn open(db_path: impl Into<PathBuf>) -> SourceResult<Self> {
        let db_path = db_path.into();

        let bootstrap = open_db(&db_path).map_err(SourceError::Db)?;
        drop(bootstrap);

        debug!("event=source_open module=source status=ok kind=direct");
        Ok(Self { db_path })
    }
}

impl ConnectionSource for DirectConnectionSource {
    fn acquire(&self) -> SourceResult<ConnectionHandle> {
        let mut conn = Connection::open(&self.db_path).map_err(|err| {
            error!("event=conn_acquire module=source status=error kind=direct error={err}");
            SourceError::Connect(err)
        })?;

        if let Err(err) = configure_connection(&mut conn) {
            error!("event=conn_acquire module=source status=error kind=direct error={err}");
            return Err(SourceError::Connect(err));
        }

        debug!("event=conn_acquire module=source status=ok kind=direct");
        Ok(ConnectionHandle::owned(conn))
    }
}
