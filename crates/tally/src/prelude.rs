//! Tally Prelude
//!
//! Import this to get all commonly used types and traits:
//!
//! ```
//! use tally::prelude::*;
//! ```

// Core types
pub use crate::{EventId, LedgerEvent, Result, TallyDb, TallyError};

// Read model
pub use crate::{
    Address, Amount, Bet, Entity, EntityKind, GlobalStats, LedgerId, Record, Task,
    UserAchievements, UserBet, UserDashStats, UserFavStats, UserTask, GLOBAL_STATS_KEY,
};

// Configs
pub use crate::{ProjectorConfig, StoreConfig, SynchronousMode};

// Traits
pub use crate::{EntityStore, EventCodec, EventSource};

// Implementations
pub use crate::{
    JsonCodec, MemorySource, MemoryStore, NdjsonSource, Projector, ShutdownHandle,
    SqliteEntityStore,
};

// Re-export common external deps
pub use anyhow;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tracing;
