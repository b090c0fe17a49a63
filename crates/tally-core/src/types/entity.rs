//! Entity types of the read model
//!
//! Every entity is keyed by a stable string and stored as one row. Entities
//! are created by the first event that introduces them and updated in place
//! afterwards; nothing is ever deleted.

use crate::types::{Address, Amount};
use crate::{Result, TallyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of the one and only [`GlobalStats`] row
pub const GLOBAL_STATS_KEY: &str = "1";

/// Discriminant for each entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bet,
    UserBet,
    Task,
    UserTask,
    UserFavStats,
    UserDashStats,
    UserAchievements,
    GlobalStats,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Bet,
        EntityKind::UserBet,
        EntityKind::Task,
        EntityKind::UserTask,
        EntityKind::UserFavStats,
        EntityKind::UserDashStats,
        EntityKind::UserAchievements,
        EntityKind::GlobalStats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bet => "Bet",
            EntityKind::UserBet => "UserBet",
            EntityKind::Task => "Task",
            EntityKind::UserTask => "UserTask",
            EntityKind::UserFavStats => "UserFavStats",
            EntityKind::UserDashStats => "UserDashStats",
            EntityKind::UserAchievements => "UserAchievements",
            EntityKind::GlobalStats => "GlobalStats",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TallyError::Serialization(format!("unknown entity kind '{}'", s)))
    }
}

/// A wager between two sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    pub initiator: Address,
    pub description: String,
    pub text_a: String,
    pub text_b: String,
    pub end_bet: u64,
    pub hashtags: Vec<String>,
    pub language: String,
    pub stake_a: Amount,
    pub stake_b: Amount,
    pub participants_a: u64,
    pub participants_b: u64,
    pub no_more_bets: bool,
    pub finished: bool,
    pub failed: bool,
    pub winner_party_a: bool,
    pub draw: bool,
    pub proof_link: Option<String>,
}

/// One user's position in one bet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBet {
    pub id: String,
    pub user: Address,
    /// Key of the referenced [`Bet`]
    pub bet: String,
    pub user_stake: Amount,
    pub joined_a: bool,
    pub redeemed: bool,
}

/// A crowd-funded task with a designated recipient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub initiator: Address,
    pub recipient: Address,
    pub amount: Amount,
    /// Initial stake, fixed at creation
    pub entrance_amount: Amount,
    pub description: String,
    pub end_task: u64,
    pub hashtags: Vec<String>,
    pub language: String,
    pub participants: u64,
    pub positive_votes: u64,
    pub negative_votes: u64,
    pub finished: bool,
    pub executed: bool,
    pub proof_link: Option<String>,
}

/// One user's position in one task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTask {
    pub id: String,
    pub user: Address,
    /// Key of the referenced [`Task`]
    pub task: String,
    pub user_stake: Amount,
    pub vote: bool,
    pub voted: bool,
}

/// Per-user betting performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFavStats {
    pub id: String,
    pub bets_won: u64,
    /// Net result of staking: joins debit, redemptions and bailouts credit
    pub bet_balance: Amount,
    pub positive_votes: u64,
    pub negative_votes: u64,
}

/// Per-user profile and dashboard data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashStats {
    pub id: String,
    pub tribute: Amount,
    pub profit: Amount,
    pub user_name: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub twitch: Option<String>,
    pub youtube: Option<String>,
    /// Append-only, duplicates kept
    pub blacklist: Vec<Address>,
    pub display_achievement: Option<u64>,
}

/// Per-user activity counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievements {
    pub id: String,
    pub bets_created: u64,
    pub bets_joined: u64,
    pub bets_finished: u64,
    pub tasks_created: u64,
    pub tasks_joined: u64,
    pub tasks_voted: u64,
}

/// Platform-wide totals, stored under [`GLOBAL_STATS_KEY`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub id: String,
    pub users: u64,
    /// Bets that finished without failing and without a draw
    pub bet_count: u64,
    pub task_count: u64,
    pub bet_profit: Amount,
    pub task_profits: Amount,
}

/// Any stored entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body")]
pub enum Entity {
    Bet(Bet),
    UserBet(UserBet),
    Task(Task),
    UserTask(UserTask),
    UserFavStats(UserFavStats),
    UserDashStats(UserDashStats),
    UserAchievements(UserAchievements),
    GlobalStats(GlobalStats),
}

/// Typed access to one entity table
///
/// Implemented by every entity struct so stores and helpers can work on
/// concrete types while storage stays keyed by `(kind, key)`.
pub trait Record: Clone + Sized {
    const KIND: EntityKind;

    fn key(&self) -> &str;

    /// Zero-valued instance with the given key
    fn blank(key: &str) -> Self;

    fn into_entity(self) -> Entity;

    fn from_entity(entity: Entity) -> Result<Self>;
}

macro_rules! record {
    ($ty:ident) => {
        impl Record for $ty {
            const KIND: EntityKind = EntityKind::$ty;

            fn key(&self) -> &str {
                &self.id
            }

            fn blank(key: &str) -> Self {
                Self {
                    id: key.to_string(),
                    ..Default::default()
                }
            }

            fn into_entity(self) -> Entity {
                Entity::$ty(self)
            }

            fn from_entity(entity: Entity) -> Result<Self> {
                match entity {
                    Entity::$ty(inner) => Ok(inner),
                    other => Err(TallyError::InvalidState(format!(
                        "expected {} entity, found {}",
                        EntityKind::$ty,
                        other.kind()
                    ))),
                }
            }
        }

        impl From<$ty> for Entity {
            fn from(value: $ty) -> Self {
                Entity::$ty(value)
            }
        }
    };
}

record!(Bet);
record!(UserBet);
record!(Task);
record!(UserTask);
record!(UserFavStats);
record!(UserDashStats);
record!(UserAchievements);
record!(GlobalStats);

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Bet(_) => EntityKind::Bet,
            Entity::UserBet(_) => EntityKind::UserBet,
            Entity::Task(_) => EntityKind::Task,
            Entity::UserTask(_) => EntityKind::UserTask,
            Entity::UserFavStats(_) => EntityKind::UserFavStats,
            Entity::UserDashStats(_) => EntityKind::UserDashStats,
            Entity::UserAchievements(_) => EntityKind::UserAchievements,
            Entity::GlobalStats(_) => EntityKind::GlobalStats,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Entity::Bet(e) => e.key(),
            Entity::UserBet(e) => e.key(),
            Entity::Task(e) => e.key(),
            Entity::UserTask(e) => e.key(),
            Entity::UserFavStats(e) => e.key(),
            Entity::UserDashStats(e) => e.key(),
            Entity::UserAchievements(e) => e.key(),
            Entity::GlobalStats(e) => e.key(),
        }
    }

    /// Serialize only the entity body (the kind is stored separately)
    pub fn body_json(&self) -> Result<String> {
        let value = match self {
            Entity::Bet(e) => serde_json::to_string(e),
            Entity::UserBet(e) => serde_json::to_string(e),
            Entity::Task(e) => serde_json::to_string(e),
            Entity::UserTask(e) => serde_json::to_string(e),
            Entity::UserFavStats(e) => serde_json::to_string(e),
            Entity::UserDashStats(e) => serde_json::to_string(e),
            Entity::UserAchievements(e) => serde_json::to_string(e),
            Entity::GlobalStats(e) => serde_json::to_string(e),
        };
        value.map_err(|e| TallyError::Serialization(e.to_string()))
    }

    /// Inverse of [`Entity::body_json`]
    pub fn from_body_json(kind: EntityKind, body: &str) -> Result<Self> {
        fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
            serde_json::from_str(body).map_err(|e| TallyError::Serialization(e.to_string()))
        }

        Ok(match kind {
            EntityKind::Bet => Entity::Bet(parse(body)?),
            EntityKind::UserBet => Entity::UserBet(parse(body)?),
            EntityKind::Task => Entity::Task(parse(body)?),
            EntityKind::UserTask => Entity::UserTask(parse(body)?),
            EntityKind::UserFavStats => Entity::UserFavStats(parse(body)?),
            EntityKind::UserDashStats => Entity::UserDashStats(parse(body)?),
            EntityKind::UserAchievements => Entity::UserAchievements(parse(body)?),
            EntityKind::GlobalStats => Entity::GlobalStats(parse(body)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_zero_valued() {
        let stats = GlobalStats::blank(GLOBAL_STATS_KEY);
        assert_eq!(stats.id, "1");
        assert_eq!(stats.users, 0);
        assert!(stats.bet_profit.is_zero());

        let dash = UserDashStats::blank("0xaa");
        assert!(dash.blacklist.is_empty());
        assert_eq!(dash.user_name, None);
    }

    #[test]
    fn test_from_entity_rejects_wrong_kind() {
        let entity = Entity::from(Bet::blank("0x1"));
        assert!(Task::from_entity(entity.clone()).is_err());
        assert_eq!(Bet::from_entity(entity).unwrap().id, "0x1");
    }

    #[test]
    fn test_kind_parse() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        assert!("Nope".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_body_json_keeps_kind_out() {
        let mut task = Task::blank("0x2");
        task.amount = Amount::new(500);
        let entity = Entity::from(task.clone());

        let body = entity.body_json().unwrap();
        assert!(body.contains("\"entranceAmount\""));
        assert!(!body.contains("\"kind\""));

        let back = Entity::from_body_json(EntityKind::Task, &body).unwrap();
        assert_eq!(back, Entity::Task(task));
    }
}
