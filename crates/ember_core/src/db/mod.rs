//! SQLite bootstrap for [`crate::storage::SqliteAdapter`].
//!
//! # Invariants
//! - A connection handed out by [`open_db`] is at [`schema::SCHEMA_VERSION`]
//!   and exposes the `records` table with the expected columns.
//! - Stores written by a newer build are refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `user_version` is ahead of what this build can read.
    SchemaTooNew { found: u32, supported: u32 },
    /// Version is current but `records` is missing or has foreign columns.
    RecordsTableMismatch { columns: Vec<String> },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store schema v{found} was written by a newer build (this build reads up to v{supported})"
            ),
            Self::RecordsTableMismatch { columns } if columns.is_empty() => {
                write!(f, "store has no `records` table")
            }
            Self::RecordsTableMismatch { columns } => write!(
                f,
                "`records` table has unexpected columns [{}]",
                columns.join(", ")
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::RecordsTableMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
