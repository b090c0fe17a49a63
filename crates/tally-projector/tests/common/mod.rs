//! Shared fixtures for projector tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use tally_core::types::event::*;
use tally_core::{
    Address, Amount, EventId, EventSource, LedgerEvent, LedgerId, MemoryStore, ProjectorConfig,
    Result,
};
use tally_projector::Projector;

pub fn addr(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn projector() -> Projector<MemoryStore> {
    init_tracing();
    Projector::new(Arc::new(MemoryStore::new()), ProjectorConfig::default())
}

/// Apply events with consecutive IDs starting at 0, panicking on failure
pub fn apply_all(projector: &Projector<MemoryStore>, events: &[LedgerEvent]) {
    let start = projector.cursor().unwrap().map(|c| c + 1).unwrap_or(0);
    for (offset, event) in events.iter().enumerate() {
        projector
            .apply(start + offset as EventId, event)
            .unwrap_or_else(|e| panic!("event {} failed: {}", event.name(), e));
    }
}

pub fn bet_created(bet: u64, initiator: &str) -> LedgerEvent {
    LedgerEvent::BetCreated(BetCreated {
        bet_id: LedgerId(bet),
        initiator: addr(initiator),
        description: "Will it rain tomorrow?".into(),
        text_a: "Yes".into(),
        text_b: "No".into(),
        end_bet: 1_700_000_000,
        hashtags: vec!["weather".into(), "rain".into(), String::new()],
        language: "en".into(),
    })
}

pub fn bet_joined(bet: u64, participant: &str, amount: i128, join_a: bool) -> LedgerEvent {
    LedgerEvent::BetJoined(BetJoined {
        bet_id: LedgerId(bet),
        participant: addr(participant),
        amount: Amount::new(amount),
        join_a,
    })
}

pub fn bet_closed(bet: u64) -> LedgerEvent {
    LedgerEvent::BetClosed(BetClosed {
        bet_id: LedgerId(bet),
    })
}

pub fn bet_finished(bet: u64, initiator: &str, failed: bool, draw: bool) -> LedgerEvent {
    LedgerEvent::BetFinished(BetFinished {
        bet_id: LedgerId(bet),
        initiator: addr(initiator),
        failed,
        winner_party_a: !failed && !draw,
        draw,
    })
}

pub fn bet_redeemed(bet: u64, participant: &str, profit: i128) -> LedgerEvent {
    LedgerEvent::BetRedeemed(BetRedeemed {
        bet_id: LedgerId(bet),
        participant: addr(participant),
        profit: Amount::new(profit),
    })
}

pub fn bet_bailout(bet: u64, participant: &str, user_stake: i128) -> LedgerEvent {
    LedgerEvent::BetBailout(BetBailout {
        bet_id: LedgerId(bet),
        participant: addr(participant),
        user_stake: Amount::new(user_stake),
    })
}

pub fn bet_proved(bet: u64, link: &str) -> LedgerEvent {
    LedgerEvent::BetProved(BetProved {
        bet_id: LedgerId(bet),
        proof_link: link.into(),
    })
}

pub fn task_added(task: u64, initiator: &str, recipient: &str, amount: i128) -> LedgerEvent {
    LedgerEvent::TaskAdded(TaskAdded {
        task_id: LedgerId(task),
        initiator: addr(initiator),
        recipient: addr(recipient),
        amount: Amount::new(amount),
        description: "Sing in the town square".into(),
        end_task: 1_700_000_000,
        hashtags: vec!["music".into()],
        language: "en".into(),
    })
}

pub fn task_joined(task: u64, participant: &str, amount: i128) -> LedgerEvent {
    LedgerEvent::TaskJoined(TaskJoined {
        task_id: LedgerId(task),
        participant: addr(participant),
        amount: Amount::new(amount),
    })
}

pub fn voted(task: u64, participant: &str, vote: bool, finished: bool) -> LedgerEvent {
    LedgerEvent::Voted(Voted {
        task_id: LedgerId(task),
        participant: addr(participant),
        vote,
        finished,
    })
}

pub fn user_redeemed(task: u64, participant: &str, amount: i128) -> LedgerEvent {
    LedgerEvent::UserRedeemed(UserRedeemed {
        task_id: LedgerId(task),
        participant: addr(participant),
        amount: Amount::new(amount),
    })
}

pub fn recipient_redeemed(task: u64, recipient: &str, amount: i128) -> LedgerEvent {
    LedgerEvent::RecipientRedeemed(RecipientRedeemed {
        task_id: LedgerId(task),
        recipient: addr(recipient),
        amount: Amount::new(amount),
    })
}

pub fn task_proved(task: u64, link: &str) -> LedgerEvent {
    LedgerEvent::TaskProved(TaskProved {
        task_id: LedgerId(task),
        proof_link: link.into(),
    })
}

pub fn name_registered(user: &str, name: &str) -> LedgerEvent {
    LedgerEvent::NameRegistered(NameRegistered {
        user: addr(user),
        registered_name: name.into(),
    })
}

pub fn social_registered(user: &str, social_id: u64, link: &str) -> LedgerEvent {
    LedgerEvent::SocialRegistered(SocialRegistered {
        user: addr(user),
        social_id,
        registered_link: link.into(),
    })
}

pub fn user_blacklisted(user: &str, target: &str) -> LedgerEvent {
    LedgerEvent::UserBlacklisted(UserBlacklisted {
        user: addr(user),
        user_to_blacklist: addr(target),
    })
}

pub fn display_achievement(user: &str, achievement: u64) -> LedgerEvent {
    LedgerEvent::DisplayAchievementChanged(DisplayAchievementChanged {
        user: addr(user),
        achievement,
    })
}

/// In-order queue of events with consecutive IDs
pub struct QueueSource {
    next_id: EventId,
    events: VecDeque<LedgerEvent>,
}

impl QueueSource {
    pub fn new(events: Vec<LedgerEvent>) -> Self {
        Self {
            next_id: 0,
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for QueueSource {
    fn next_event(&mut self) -> Result<Option<(EventId, LedgerEvent)>> {
        Ok(self.events.pop_front().map(|event| {
            let id = self.next_id;
            self.next_id += 1;
            (id, event)
        }))
    }
}
