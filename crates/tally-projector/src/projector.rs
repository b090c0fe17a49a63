use crate::handlers;
use crate::staged::StagedWrites;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tally_core::{
    observe, EntityStore, EventId, EventSource, LedgerEvent, ProjectorConfig, Result,
};

/// Projector: applies ledger events to an entity store
///
/// Events are applied strictly one at a time. Each event's mutations are
/// committed together with the new cursor; a failing event commits nothing
/// and halts the projection.
pub struct Projector<S>
where
    S: EntityStore,
{
    store: Arc<S>,
    config: ProjectorConfig,
    shutdown: Arc<AtomicBool>,
}

impl<S> Projector<S>
where
    S: EntityStore,
{
    pub fn new(store: Arc<S>, config: ProjectorConfig) -> Self {
        Self {
            store,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Apply one event and commit its effects
    pub fn apply(&self, event_id: EventId, event: &LedgerEvent) -> Result<ApplyOutcome> {
        let start = Instant::now();

        let mut staged = StagedWrites::new(self.store.as_ref());
        if let Err(e) = handlers::dispatch(&mut staged, event) {
            tracing::error!(
                event_id,
                event = event.name(),
                key = %event.primary_key(),
                "Projection halted: {}",
                e
            );
            return Err(e);
        }

        let entities_created = staged.created_count();
        let writes = staged.into_writes();
        let entities_written = writes.len();
        self.store.commit(writes, Some(event_id))?;

        observe::record_event_applied(event.name(), start.elapsed());
        tracing::debug!(
            event_id,
            event = event.name(),
            entities_written,
            entities_created,
            "Applied event"
        );

        Ok(ApplyOutcome {
            event_id,
            entities_written,
            entities_created,
        })
    }

    /// Run one iteration of the projector loop
    ///
    /// Pulls events from `source` until it is caught up, `batch_events_max`
    /// events were applied, or `max_apply_latency_ms` has elapsed. Stops at
    /// the first failing event and returns its error.
    pub fn run_once<E>(&self, source: &mut E) -> Result<ProjectorStats>
    where
        E: EventSource + ?Sized,
    {
        let start = Instant::now();
        let latency_limit = Duration::from_millis(self.config.max_apply_latency_ms);
        let mut stats = ProjectorStats::empty();

        while stats.events_applied < self.config.batch_events_max {
            if stats.events_applied > 0 && start.elapsed() > latency_limit {
                break;
            }

            let Some((event_id, event)) = source.next_event()? else {
                break;
            };

            let outcome = self.apply(event_id, &event)?;
            stats.events_applied += 1;
            stats.entities_written += outcome.entities_written;
            stats.new_cursor = Some(event_id);
        }

        stats.duration = start.elapsed();
        if stats.events_applied > 0 {
            observe::record_projector_run(stats.duration, stats.events_applied as u64);
        }
        Ok(stats)
    }

    /// Run the projector continuously until shutdown or the first error.
    ///
    /// Sleeps `poll_interval_ms` whenever the source is caught up. Unlike a
    /// retrying consumer, an error ends the loop: the read model cannot skip
    /// an event without diverging from the ledger.
    pub async fn run_continuous<E>(&self, source: &mut E) -> Result<()>
    where
        E: EventSource + ?Sized,
    {
        tracing::info!("Projector started");

        while !self.shutdown.load(Ordering::SeqCst) {
            let stats = self.run_once(source)?;

            if stats.events_applied == 0 {
                tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
            } else {
                tracing::debug!(
                    "Applied {} events, {} entity writes in {:?}",
                    stats.events_applied,
                    stats.entities_written,
                    stats.duration
                );
            }
        }

        tracing::info!("Projector shutdown");
        Ok(())
    }

    /// Signal graceful shutdown
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Get a handle that can stop the loop from another task
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Last applied event ID
    pub fn cursor(&self) -> Result<Option<EventId>> {
        self.store.cursor()
    }
}

/// Handle for stopping a running projector
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Effects of one applied event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub event_id: EventId,
    pub entities_written: usize,
    pub entities_created: usize,
}

#[derive(Debug, Clone)]
pub struct ProjectorStats {
    pub events_applied: usize,
    pub entities_written: usize,
    pub duration: Duration,
    pub new_cursor: Option<EventId>,
}

impl ProjectorStats {
    fn empty() -> Self {
        Self {
            events_applied: 0,
            entities_written: 0,
            duration: Duration::from_secs(0),
            new_cursor: None,
        }
    }
}
