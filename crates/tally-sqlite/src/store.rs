use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::sync::Arc;
use tally_core::{
    error::{Result, TallyError},
    Entity, EntityKind, EntityStore, EventId, StoreConfig,
};

use crate::schema;
use crate::txn::EntityTxn;

/// SQLite-backed entity store
pub struct SqliteEntityStore {
    conn: Arc<Mutex<Connection>>,
    config: StoreConfig,
}

impl SqliteEntityStore {
    /// Open (or create) the database at `cfg.path`
    ///
    /// Parent directories are created as needed. The schema is initialised
    /// and then migrated forward to `cfg.schema_version`.
    pub fn open(cfg: StoreConfig) -> Result<Self> {
        if let Some(parent) = cfg.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &cfg.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| TallyError::Store(e.to_string()))?;

        Self::configure_connection(&conn, &cfg)?;
        schema::init(&conn)?;
        schema::migrate(&conn, cfg.schema_version)?;

        tracing::debug!("Opened entity store at {}", cfg.path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config: cfg,
        })
    }

    /// Open a private in-memory database
    ///
    /// WAL is not available for in-memory databases, so it is skipped.
    pub fn open_in_memory() -> Result<Self> {
        let cfg = StoreConfig::new(":memory:".into()).with_wal_mode(false);
        let conn =
            Connection::open_in_memory().map_err(|e| TallyError::Store(e.to_string()))?;

        Self::configure_connection(&conn, &cfg)?;
        schema::init(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config: cfg,
        })
    }

    fn configure_connection(conn: &Connection, cfg: &StoreConfig) -> Result<()> {
        if cfg.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| TallyError::Config(e.to_string()))?;
        }

        conn.pragma_update(None, "synchronous", cfg.synchronous.as_pragma())
            .map_err(|e| TallyError::Config(e.to_string()))?;

        conn.pragma_update(None, "cache_size", cfg.cache_size)
            .map_err(|e| TallyError::Config(e.to_string()))?;

        Ok(())
    }

    /// Get the underlying connection (for custom read queries)
    pub fn conn(&self) -> &Arc<Mutex<Connection>> {
        &self.conn
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Begin a write transaction
    pub fn begin_txn(&self) -> Result<EntityTxn<'_>> {
        EntityTxn::new(self.conn.lock())
    }

    pub fn schema_version(&self) -> Result<u32> {
        schema::version(&self.conn.lock())
    }

    pub fn migrate(&self, target_version: u32) -> Result<()> {
        schema::migrate(&self.conn.lock(), target_version)
    }

    /// Number of stored rows of one kind
    pub fn count(&self, kind: EntityKind) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM entities WHERE kind = ?1",
                [kind.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| TallyError::Store(e.to_string()))?;

        Ok(count as u64)
    }

    /// Every entity in `(kind, key)` order
    pub fn snapshot(&self) -> Result<Vec<Entity>> {
        let mut all = Vec::new();
        for kind in EntityKind::ALL {
            all.extend(self.list(kind)?);
        }
        Ok(all)
    }
}

impl EntityStore for SqliteEntityStore {
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Entity>> {
        let conn = self.conn.lock();
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM entities WHERE kind = ?1 AND key = ?2",
                params![kind.as_str(), key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| TallyError::Store(e.to_string()))?;

        body.map(|body| Entity::from_body_json(kind, &body))
            .transpose()
    }

    fn commit(&self, entities: Vec<Entity>, cursor: Option<EventId>) -> Result<()> {
        let mut txn = self.begin_txn()?;
        for entity in &entities {
            txn.put(entity)?;
        }
        txn.commit(cursor)
    }

    fn cursor(&self) -> Result<Option<EventId>> {
        let conn = self.conn.lock();
        let cursor: i64 = conn
            .query_row(
                "SELECT last_applied_event_id FROM projection_meta WHERE id = 0",
                [],
                |row| row.get(0),
            )
            .map_err(|e| TallyError::Store(e.to_string()))?;

        // -1 means no events processed yet
        Ok(if cursor < 0 {
            None
        } else {
            Some(cursor as EventId)
        })
    }

    fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT body FROM entities WHERE kind = ?1 ORDER BY key")
            .map_err(|e| TallyError::Store(e.to_string()))?;

        let bodies = stmt
            .query_map([kind.as_str()], |row| row.get::<_, String>(0))
            .map_err(|e| TallyError::Store(e.to_string()))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TallyError::Store(e.to_string()))?;

        bodies
            .iter()
            .map(|body| Entity::from_body_json(kind, body))
            .collect()
    }
}
