#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use tally::event::*;
use tally::{Address, Amount, LedgerEvent, LedgerId};

pub const U1: &str = "0x1000000000000000000000000000000000000001";
pub const U2: &str = "0x2000000000000000000000000000000000000002";
pub const U3: &str = "0x3000000000000000000000000000000000000003";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn addr(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

pub fn bet_created(bet: u64, initiator: &str) -> LedgerEvent {
    LedgerEvent::BetCreated(BetCreated {
        bet_id: LedgerId(bet),
        initiator: addr(initiator),
        description: "Derby winner".into(),
        text_a: "Home".into(),
        text_b: "Away".into(),
        end_bet: 1_700_000_000,
        hashtags: vec!["football".into()],
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

pub fn bet_finished(bet: u64, initiator: &str) -> LedgerEvent {
    LedgerEvent::BetFinished(BetFinished {
        bet_id: LedgerId(bet),
        initiator: addr(initiator),
        failed: false,
        winner_party_a: false,
        draw: false,
    })
}

pub fn social_registered(user: &str, channel: u64, link: &str) -> LedgerEvent {
    LedgerEvent::SocialRegistered(SocialRegistered {
        user: addr(user),
        social_id: channel,
        registered_link: link.into(),
    })
}

/// Append raw lines to an NDJSON file
pub fn append_lines(path: &Path, lines: &[String]) {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

/// Encode events as envelope lines with consecutive IDs from `start`
pub fn envelope_lines(start: u64, events: &[LedgerEvent]) -> Vec<String> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            String::from_utf8(tally::event_format::encode(start + i as u64, event).unwrap())
                .unwrap()
        })
        .collect()
}
