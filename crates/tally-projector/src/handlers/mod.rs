//! Per-event-type handlers
//!
//! Each handler reads and writes through [`StagedWrites`] only. Handlers for
//! lifecycle events on bets and tasks fail with
//! [`TallyError::MissingEntity`](tally_core::TallyError::MissingEntity) when
//! the record was never created; stats rows are created on demand.
//!
//! Re-delivered events are applied again. Deduplication belongs to the event
//! source.

pub mod bet;
pub mod identity;
pub mod task;

use crate::staged::StagedWrites;
use tally_core::{EntityStore, LedgerEvent, Result};

/// Route one event to its handler
pub fn dispatch<S>(staged: &mut StagedWrites<'_, S>, event: &LedgerEvent) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    match event {
        LedgerEvent::BetCreated(e) => bet::bet_created(staged, e),
        LedgerEvent::BetJoined(e) => bet::bet_joined(staged, e),
        LedgerEvent::BetClosed(e) => bet::bet_closed(staged, e),
        LedgerEvent::BetFinished(e) => bet::bet_finished(staged, e),
        LedgerEvent::BetRedeemed(e) => bet::bet_redeemed(staged, e),
        LedgerEvent::BetBailout(e) => bet::bet_bailout(staged, e),
        LedgerEvent::BetProved(e) => bet::bet_proved(staged, e),
        LedgerEvent::TaskAdded(e) => task::task_added(staged, e),
        LedgerEvent::TaskJoined(e) => task::task_joined(staged, e),
        LedgerEvent::Voted(e) => task::voted(staged, e),
        LedgerEvent::UserRedeemed(e) => task::user_redeemed(staged, e),
        LedgerEvent::RecipientRedeemed(e) => task::recipient_redeemed(staged, e),
        LedgerEvent::TaskProved(e) => task::task_proved(staged, e),
        LedgerEvent::NameRegistered(e) => identity::name_registered(staged, e),
        LedgerEvent::SocialRegistered(e) => identity::social_registered(staged, e),
        LedgerEvent::UserBlacklisted(e) => identity::user_blacklisted(staged, e),
        LedgerEvent::DisplayAchievementChanged(e) => {
            identity::display_achievement_changed(staged, e)
        }
    }
}
