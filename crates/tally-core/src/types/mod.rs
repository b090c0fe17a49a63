pub mod amount;
pub mod entity;
pub mod event;
pub mod ids;

pub use amount::{bump, Amount};
pub use entity::{
    Bet, Entity, EntityKind, GlobalStats, Record, Task, UserAchievements, UserBet, UserDashStats,
    UserFavStats, UserTask, GLOBAL_STATS_KEY,
};
pub use event::{EventId, LedgerEvent, SocialChannel};
pub use ids::{pair_key, Address, LedgerId};
