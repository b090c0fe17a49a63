use rusqlite::Connection;
use tally_core::error::{Result, TallyError};

/// Create the metadata and entity tables if they are missing
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS projection_meta (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            last_applied_event_id INTEGER NOT NULL DEFAULT -1,
            schema_version INTEGER NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS entities (
            kind TEXT NOT NULL,
            key TEXT NOT NULL,
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (kind, key)
        ) WITHOUT ROWID;",
    )
    .map_err(|e| TallyError::Store(e.to_string()))?;

    // -1 means no events processed yet
    conn.execute(
        "INSERT OR IGNORE INTO projection_meta (id, last_applied_event_id, schema_version)
         VALUES (0, -1, 1)",
        [],
    )
    .map_err(|e| TallyError::Store(e.to_string()))?;

    Ok(())
}

/// Read the stored schema version
pub fn version(conn: &Connection) -> Result<u32> {
    let version: i64 = conn
        .query_row(
            "SELECT schema_version FROM projection_meta WHERE id = 0",
            [],
            |row| row.get(0),
        )
        .map_err(|e| TallyError::Store(e.to_string()))?;

    Ok(version as u32)
}

/// Move the schema version forward to `target_version`
///
/// Downgrades are refused: a newer schema may hold rows an older reader
/// cannot interpret.
pub fn migrate(conn: &Connection, target_version: u32) -> Result<()> {
    let current_version = version(conn)?;

    if target_version < current_version {
        return Err(TallyError::InvalidState(format!(
            "Cannot downgrade schema version from {} to {}",
            current_version, target_version
        )));
    }

    if current_version == target_version {
        return Ok(());
    }

    conn.execute(
        "UPDATE projection_meta SET schema_version = ?1, updated_at = datetime('now') WHERE id = 0",
        [target_version as i64],
    )
    .map_err(|e| TallyError::Store(e.to_string()))?;

    tracing::info!(
        "Migrated schema from version {} to {}",
        current_version,
        target_version
    );
    Ok(())
}
