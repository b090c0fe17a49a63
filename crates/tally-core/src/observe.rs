//! Optional metrics instrumentation for Tally.
//!
//! When the `observe` feature is enabled, the projector emits counters and
//! histograms via the [`metrics`] crate. A downstream application must install
//! a metrics recorder (e.g. `metrics-exporter-prometheus`) to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record one applied event.
///
/// - `tally.events.applied_total` – counter with `event` label
/// - `tally.events.apply_duration_seconds` – histogram
#[inline]
pub fn record_event_applied(event: &'static str, duration: std::time::Duration) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tally.events.applied_total", "event" => event).increment(1);
        metrics::histogram!("tally.events.apply_duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (event, duration);
    }
}

/// Record an entity materialised by load-or-create.
///
/// - `tally.entities.created_total` – counter with `kind` label
#[inline]
pub fn record_entity_created(kind: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tally.entities.created_total", "kind" => kind).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = kind;
    }
}

/// Record a projector run (counter + duration + events processed).
///
/// - `tally.projector.runs_total` – counter
/// - `tally.projector.run_duration_seconds` – histogram
/// - `tally.projector.events_processed_total` – counter
#[inline]
pub fn record_projector_run(duration: std::time::Duration, events_processed: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tally.projector.runs_total").increment(1);
        metrics::histogram!("tally.projector.run_duration_seconds").record(duration.as_secs_f64());
        metrics::counter!("tally.projector.events_processed_total").increment(events_processed);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, events_processed);
    }
}
