//! Tally Core: Traits and types for the tally projection engine
//!
//! This crate defines the core abstractions shared by every other crate:
//! - Entity types: the denormalized read model (bets, tasks, per-user stats, global stats)
//! - Ledger events: the decoded event stream the projector consumes
//! - Entity store: keyed load/commit of entities plus a cursor
//! - Event source: ordered, deduplicated event delivery
//!
//! Key properties:
//! - Append/update-only model: entities are never deleted
//! - Checked arithmetic: overflow is a projection error, never a wrap
//! - Stable keys: every entity key is derived from ledger IDs or addresses

pub mod config;
pub mod error;
pub mod memory;
pub mod observe;
pub mod traits;
pub mod types;

pub use config::{ProjectorConfig, StoreConfig, SynchronousMode};
pub use error::{Result, TallyError};
pub use memory::MemoryStore;
pub use traits::{EntityStore, EventSource};
pub use types::{
    bump, pair_key, Address, Amount, Bet, Entity, EntityKind, EventId, GlobalStats, LedgerEvent,
    LedgerId, Record, SocialChannel, Task, UserAchievements, UserBet, UserDashStats,
    UserFavStats, UserTask, GLOBAL_STATS_KEY,
};
