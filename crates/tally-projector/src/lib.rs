//! Projector: Event handlers and processing loop
//!
//! Applies ledger events to the entity store, one event at a time.
//!
//! Key features:
//! - Load-or-create: stats rows materialise on first touch
//! - Staged writes: one event's mutations commit together or not at all
//! - Fail fast: a missing bet/task halts the projection
//! - Batching and graceful shutdown in the driver loop

pub mod global;
pub mod handlers;
pub mod loaded;
pub mod projector;
pub mod staged;

pub use loaded::{load_or_create, Loaded};
pub use projector::{ApplyOutcome, Projector, ProjectorStats, ShutdownHandle};
pub use staged::StagedWrites;
