//! SQLite-backed entity store implementation
//!
//! Persists the read model as one JSON row per entity, keyed by
//! `(kind, key)`, next to a cursor of the last applied event.
//!
//! Key features:
//! - Cursor tracking for event application
//! - Schema versioning
//! - WAL mode for concurrent readers
//! - Atomic per-event commits

pub mod schema;
pub mod store;
pub mod txn;

pub use store::SqliteEntityStore;
pub use txn::EntityTxn;
