//! Unified tally database interface
//!
//! Bundles the SQLite entity store and the projector behind one handle.

use crate::source::NdjsonSource;
use crate::{
    ApplyOutcome, EntityStore, EventId, EventSource, GlobalStats, LedgerEvent, Projector,
    ProjectorConfig, ProjectorStats, Record, Result, ShutdownHandle, SqliteEntityStore,
    StoreConfig, GLOBAL_STATS_KEY,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Unified tally database
pub struct TallyDb {
    store: Arc<SqliteEntityStore>,
    projector: Projector<SqliteEntityStore>,
    base_path: PathBuf,
}

impl TallyDb {
    /// Open a tally database in the given directory
    ///
    /// The read model lives in `{path}/tally.db`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        let store_config = StoreConfig::new(base_path.join("tally.db"));

        Self::open_with_config(base_path, store_config, ProjectorConfig::default())
    }

    /// Open with custom configurations
    pub fn open_with_config(
        base_path: PathBuf,
        store_config: StoreConfig,
        projector_config: ProjectorConfig,
    ) -> Result<Self> {
        let store = Arc::new(SqliteEntityStore::open(store_config)?);
        let projector = Projector::new(store.clone(), projector_config);

        tracing::info!(
            "Opened tally database at {} (cursor {:?})",
            base_path.display(),
            store.cursor()?
        );

        Ok(Self {
            store,
            projector,
            base_path,
        })
    }

    pub fn store(&self) -> &Arc<SqliteEntityStore> {
        &self.store
    }

    pub fn projector(&self) -> &Projector<SqliteEntityStore> {
        &self.projector
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Apply one event
    pub fn apply(&self, event_id: EventId, event: &LedgerEvent) -> Result<ApplyOutcome> {
        self.projector.apply(event_id, event)
    }

    /// Apply one batch from `source`
    pub fn run_once<E: EventSource + ?Sized>(&self, source: &mut E) -> Result<ProjectorStats> {
        self.projector.run_once(source)
    }

    /// Drain `source` until it reports caught up
    pub fn catch_up<E: EventSource + ?Sized>(&self, source: &mut E) -> Result<ProjectorStats> {
        let mut total = ProjectorStats {
            events_applied: 0,
            entities_written: 0,
            duration: Duration::from_secs(0),
            new_cursor: None,
        };

        loop {
            let stats = self.projector.run_once(source)?;
            if stats.events_applied == 0 {
                break;
            }
            total.events_applied += stats.events_applied;
            total.entities_written += stats.entities_written;
            total.duration += stats.duration;
            total.new_cursor = stats.new_cursor;
        }

        Ok(total)
    }

    /// Project every envelope in an NDJSON file
    pub fn ingest_ndjson<P: AsRef<Path>>(&self, path: P) -> Result<ProjectorStats> {
        let mut source = NdjsonSource::open(path)?;
        let stats = self.catch_up(&mut source)?;

        tracing::info!(
            "Ingested {} events from {} ({} bytes)",
            stats.events_applied,
            source.path().display(),
            source.offset()
        );
        Ok(stats)
    }

    /// Follow an NDJSON file, projecting lines as they are appended
    ///
    /// Runs until [`shutdown`](TallyDb::shutdown) or the first failing event.
    pub async fn follow_ndjson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut source = NdjsonSource::open(path)?;
        self.projector.run_continuous(&mut source).await
    }

    /// Typed lookup
    pub fn get<T: Record>(&self, key: &str) -> Result<Option<T>> {
        self.store.get(key)
    }

    /// Every entity of one type, ordered by key
    pub fn list<T: Record>(&self) -> Result<Vec<T>> {
        self.store.list_as()
    }

    /// Platform totals; zeroed if no event has touched them yet
    pub fn global_stats(&self) -> Result<GlobalStats> {
        Ok(self
            .store
            .get::<GlobalStats>(GLOBAL_STATS_KEY)?
            .unwrap_or_else(|| GlobalStats::blank(GLOBAL_STATS_KEY)))
    }

    /// Last applied event ID
    pub fn cursor(&self) -> Result<Option<EventId>> {
        self.store.cursor()
    }

    /// Migrate the store schema forward
    pub fn migrate(&self, target_version: u32) -> Result<()> {
        self.store.migrate(target_version)
    }

    /// Stop a running `run_continuous` loop
    pub fn shutdown(&self) {
        self.projector.shutdown();
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.projector.shutdown_handle()
    }
}
