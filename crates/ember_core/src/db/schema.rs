//! Layout of the shared `records` table and its upgrade path.
//!
//! Every record kind lives in `records`, partitioned by `kind`. The version
//! is kept in `PRAGMA user_version`.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Step `n` moves a store from version `n` to `n + 1`.
const UPGRADES: &[&str] = &[include_str!("sql/0001_records.sql")];

/// Version this build writes.
pub const SCHEMA_VERSION: u32 = UPGRADES.len() as u32;

/// Columns of `records`, in declaration order.
pub const RECORD_COLUMNS: [&str; 4] = ["seq", "kind", "id", "body"];

pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every pending step in one transaction, then checks `records`.
pub(crate) fn upgrade(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        for (step, sql) in UPGRADES.iter().enumerate().skip(found as usize) {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", step as u32 + 1)?;
        }
        tx.commit()?;
        info!(
            "event=db_upgrade module=db status=ok from={} to={}",
            found, SCHEMA_VERSION
        );
    }

    verify_records_table(conn)
}

fn verify_records_table(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('records') ORDER BY cid;")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns != RECORD_COLUMNS {
        return Err(DbError::RecordsTableMismatch { columns });
    }
    Ok(())
}
