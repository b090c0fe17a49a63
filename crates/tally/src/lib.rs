//! Tally: incremental projection of a bet and task ledger
//!
//! Tally consumes an ordered stream of ledger events and maintains a
//! queryable read model that always reflects the events applied so far:
//! - **Entities**: bets, tasks, per-user participation rows and statistics
//! - **Global stats**: one platform-wide singleton record
//! - **Projector**: per-event handlers, committed atomically per event
//! - **Stores**: SQLite for persistence, in-memory for tests
//! - **Sources**: in-memory queue and NDJSON files
//!
//! # Quick Start
//!
//! ```no_run
//! use tally::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let db = TallyDb::open("./data")?;
//!
//! // Project a file of JSON envelopes
//! db.ingest_ndjson("./events.ndjson")?;
//!
//! let stats = db.global_stats()?;
//! println!("{} users, {} bets settled", stats.users, stats.bet_count);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod event_format;
pub mod prelude;
pub mod source;

// Re-export core types
pub use tally_core::{
    config::{ProjectorConfig, StoreConfig, SynchronousMode},
    error::{Result, TallyError},
    pair_key,
    traits::{EntityStore, EventSource},
    types::event,
    Address, Amount, Bet, Entity, EntityKind, EventId, GlobalStats, LedgerEvent, LedgerId,
    MemoryStore, Record, SocialChannel, Task, UserAchievements, UserBet, UserDashStats,
    UserFavStats, UserTask, GLOBAL_STATS_KEY,
};

// Re-export implementations
pub use tally_projector::{ApplyOutcome, Projector, ProjectorStats, ShutdownHandle};
pub use tally_sqlite::SqliteEntityStore;

// Re-export main types from this crate
pub use db::TallyDb;
pub use event_format::{Envelope, EventCodec, EventMetadata, JsonCodec};
pub use source::{MemorySource, NdjsonSource};
