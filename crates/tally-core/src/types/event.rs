//! Decoded ledger events
//!
//! The event source decodes raw ledger logs into [`LedgerEvent`] values and
//! delivers them in ledger order. Field names follow the ledger ABI in
//! camelCase when serialized.

use crate::types::{Address, Amount, LedgerId};
use serde::{Deserialize, Serialize};

/// Position of an event in the ledger's total order
pub type EventId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetCreated {
    pub bet_id: LedgerId,
    pub initiator: Address,
    pub description: String,
    pub text_a: String,
    pub text_b: String,
    pub end_bet: u64,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetJoined {
    pub bet_id: LedgerId,
    pub participant: Address,
    pub amount: Amount,
    /// `true` joins side A, `false` side B
    pub join_a: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetClosed {
    pub bet_id: LedgerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetFinished {
    pub bet_id: LedgerId,
    pub initiator: Address,
    pub failed: bool,
    pub winner_party_a: bool,
    pub draw: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRedeemed {
    pub bet_id: LedgerId,
    pub participant: Address,
    pub profit: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetBailout {
    pub bet_id: LedgerId,
    pub participant: Address,
    /// Amount returned to the participant
    pub user_stake: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetProved {
    pub bet_id: LedgerId,
    pub proof_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAdded {
    pub task_id: LedgerId,
    pub initiator: Address,
    pub recipient: Address,
    pub amount: Amount,
    pub description: String,
    pub end_task: u64,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJoined {
    pub task_id: LedgerId,
    pub participant: Address,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voted {
    pub task_id: LedgerId,
    pub participant: Address,
    pub vote: bool,
    /// Decided by the ledger (quorum or deadline), copied as-is
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRedeemed {
    pub task_id: LedgerId,
    pub participant: Address,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRedeemed {
    pub task_id: LedgerId,
    pub recipient: Address,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProved {
    pub task_id: LedgerId,
    pub proof_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRegistered {
    pub user: Address,
    pub registered_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRegistered {
    pub user: Address,
    #[serde(rename = "socialID")]
    pub social_id: u64,
    pub registered_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBlacklisted {
    pub user: Address,
    pub user_to_blacklist: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAchievementChanged {
    pub user: Address,
    pub achievement: u64,
}

/// Every event type the projector understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum LedgerEvent {
    BetCreated(BetCreated),
    BetJoined(BetJoined),
    BetClosed(BetClosed),
    BetFinished(BetFinished),
    BetRedeemed(BetRedeemed),
    BetBailout(BetBailout),
    BetProved(BetProved),
    TaskAdded(TaskAdded),
    TaskJoined(TaskJoined),
    Voted(Voted),
    UserRedeemed(UserRedeemed),
    RecipientRedeemed(RecipientRedeemed),
    TaskProved(TaskProved),
    NameRegistered(NameRegistered),
    SocialRegistered(SocialRegistered),
    UserBlacklisted(UserBlacklisted),
    DisplayAchievementChanged(DisplayAchievementChanged),
}

impl LedgerEvent {
    /// Ledger event name, also the serialized tag
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::BetCreated(_) => "BetCreated",
            LedgerEvent::BetJoined(_) => "BetJoined",
            LedgerEvent::BetClosed(_) => "BetClosed",
            LedgerEvent::BetFinished(_) => "BetFinished",
            LedgerEvent::BetRedeemed(_) => "BetRedeemed",
            LedgerEvent::BetBailout(_) => "BetBailout",
            LedgerEvent::BetProved(_) => "BetProved",
            LedgerEvent::TaskAdded(_) => "TaskAdded",
            LedgerEvent::TaskJoined(_) => "TaskJoined",
            LedgerEvent::Voted(_) => "Voted",
            LedgerEvent::UserRedeemed(_) => "UserRedeemed",
            LedgerEvent::RecipientRedeemed(_) => "RecipientRedeemed",
            LedgerEvent::TaskProved(_) => "TaskProved",
            LedgerEvent::NameRegistered(_) => "NameRegistered",
            LedgerEvent::SocialRegistered(_) => "SocialRegistered",
            LedgerEvent::UserBlacklisted(_) => "UserBlacklisted",
            LedgerEvent::DisplayAchievementChanged(_) => "DisplayAchievementChanged",
        }
    }

    /// Key of the primary entity the event affects
    pub fn primary_key(&self) -> String {
        match self {
            LedgerEvent::BetCreated(e) => e.bet_id.key(),
            LedgerEvent::BetJoined(e) => e.bet_id.key(),
            LedgerEvent::BetClosed(e) => e.bet_id.key(),
            LedgerEvent::BetFinished(e) => e.bet_id.key(),
            LedgerEvent::BetRedeemed(e) => e.bet_id.key(),
            LedgerEvent::BetBailout(e) => e.bet_id.key(),
            LedgerEvent::BetProved(e) => e.bet_id.key(),
            LedgerEvent::TaskAdded(e) => e.task_id.key(),
            LedgerEvent::TaskJoined(e) => e.task_id.key(),
            LedgerEvent::Voted(e) => e.task_id.key(),
            LedgerEvent::UserRedeemed(e) => e.task_id.key(),
            LedgerEvent::RecipientRedeemed(e) => e.task_id.key(),
            LedgerEvent::TaskProved(e) => e.task_id.key(),
            LedgerEvent::NameRegistered(e) => e.user.to_string(),
            LedgerEvent::SocialRegistered(e) => e.user.to_string(),
            LedgerEvent::UserBlacklisted(e) => e.user.to_string(),
            LedgerEvent::DisplayAchievementChanged(e) => e.user.to_string(),
        }
    }
}

/// Social platform slot selected by a ledger channel id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialChannel {
    Instagram,
    Twitter,
    TikTok,
    Twitch,
    YouTube,
    /// Channel ids this version does not know about
    Unrecognized(u64),
}

impl From<u64> for SocialChannel {
    fn from(id: u64) -> Self {
        match id {
            1 => SocialChannel::Instagram,
            2 => SocialChannel::Twitter,
            3 => SocialChannel::TikTok,
            4 => SocialChannel::Twitch,
            5 => SocialChannel::YouTube,
            other => SocialChannel::Unrecognized(other),
        }
    }
}
