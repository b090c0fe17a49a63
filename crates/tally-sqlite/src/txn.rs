use parking_lot::MutexGuard;
use rusqlite::{params, Connection};
use tally_core::{
    error::{Result, TallyError},
    Entity, EventId,
};

/// Write transaction over the entity tables
///
/// Holds the connection lock for its whole lifetime. Dropping it without
/// calling [`commit`](EntityTxn::commit) rolls back.
pub struct EntityTxn<'a> {
    conn: MutexGuard<'a, Connection>,
    in_txn: bool,
}

impl<'a> EntityTxn<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Result<Self> {
        conn.execute("BEGIN IMMEDIATE TRANSACTION", [])
            .map_err(|e| TallyError::Store(e.to_string()))?;

        Ok(Self { conn, in_txn: true })
    }

    /// Insert or replace one entity row
    pub fn put(&mut self, entity: &Entity) -> Result<()> {
        let body = entity.body_json()?;
        self.conn
            .execute(
                "INSERT INTO entities (kind, key, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT(kind, key) DO UPDATE SET body = excluded.body, updated_at = datetime('now')",
                params![entity.kind().as_str(), entity.key(), body],
            )
            .map_err(|e| TallyError::Store(e.to_string()))?;
        Ok(())
    }

    /// Commit the transaction, advancing the cursor if given
    pub fn commit(mut self, new_cursor: Option<EventId>) -> Result<()> {
        if self.in_txn {
            if let Some(cursor) = new_cursor {
                // SQLite integers are signed 64-bit
                let cursor = i64::try_from(cursor).map_err(|_| {
                    TallyError::InvalidState(format!(
                        "Event ID {} exceeds the SQLite cursor range",
                        cursor
                    ))
                })?;
                self.conn
                    .execute(
                        "UPDATE projection_meta SET last_applied_event_id = ?1, updated_at = datetime('now') WHERE id = 0",
                        [cursor],
                    )
                    .map_err(|e| TallyError::Store(e.to_string()))?;
            }

            self.conn
                .execute("COMMIT", [])
                .map_err(|e| TallyError::Store(e.to_string()))?;

            self.in_txn = false;
        }
        Ok(())
    }

    pub fn rollback(mut self) {
        if self.in_txn {
            let _ = self.conn.execute("ROLLBACK", []);
            self.in_txn = false;
        }
    }
}

impl<'a> Drop for EntityTxn<'a> {
    fn drop(&mut self) {
        if self.in_txn {
            let _ = self.conn.execute("ROLLBACK", []);
        }
    }
}
