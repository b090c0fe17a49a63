//! Bet lifecycle: `Open -> Closed -> Finished -> (Redeemed per participant)*`

use crate::global::{touch_global, update_achievements, update_global};
use crate::staged::StagedWrites;
use tally_core::types::event::{
    BetBailout, BetClosed, BetCreated, BetFinished, BetJoined, BetProved, BetRedeemed,
};
use tally_core::{bump, pair_key, Amount, Bet, EntityStore, Result, UserBet, UserFavStats};

pub fn bet_created<S>(staged: &mut StagedWrites<'_, S>, event: &BetCreated) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let bet_key = event.bet_id.key();

    staged.create(Bet {
        id: bet_key.clone(),
        initiator: event.initiator.clone(),
        description: event.description.clone(),
        text_a: event.text_a.clone(),
        text_b: event.text_b.clone(),
        end_bet: event.end_bet,
        hashtags: event.hashtags.clone(),
        language: event.language.clone(),
        ..Default::default()
    })?;

    staged.create(UserBet {
        id: pair_key(&event.initiator, event.bet_id),
        user: event.initiator.clone(),
        bet: bet_key,
        ..Default::default()
    })?;

    update_achievements(staged, &event.initiator, |a| bump(&mut a.bets_created))
}

pub fn bet_joined<S>(staged: &mut StagedWrites<'_, S>, event: &BetJoined) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let bet_key = event.bet_id.key();

    staged.modify::<Bet, _>(&bet_key, |bet| {
        if event.join_a {
            bet.stake_a = bet.stake_a.checked_add(event.amount)?;
            bump(&mut bet.participants_a)
        } else {
            bet.stake_b = bet.stake_b.checked_add(event.amount)?;
            bump(&mut bet.participants_b)
        }
    })?;

    staged.create(UserBet {
        id: pair_key(&event.participant, event.bet_id),
        user: event.participant.clone(),
        bet: bet_key,
        user_stake: event.amount,
        joined_a: event.join_a,
        redeemed: false,
    })?;

    // Stake is at risk until the bet resolves
    staged.upsert::<UserFavStats, _>(event.participant.as_str(), |fav| {
        fav.bet_balance = fav.bet_balance.checked_sub(event.amount)?;
        Ok(())
    })?;

    update_achievements(staged, &event.participant, |a| bump(&mut a.bets_joined))?;
    touch_global(staged)
}

pub fn bet_closed<S>(staged: &mut StagedWrites<'_, S>, event: &BetClosed) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Bet, _>(&event.bet_id.key(), |bet| {
        bet.no_more_bets = true;
        Ok(())
    })
}

pub fn bet_finished<S>(staged: &mut StagedWrites<'_, S>, event: &BetFinished) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Bet, _>(&event.bet_id.key(), |bet| {
        bet.finished = true;
        bet.failed = event.failed;
        bet.winner_party_a = event.winner_party_a;
        bet.draw = event.draw;
        Ok(())
    })?;

    update_achievements(staged, &event.initiator, |a| bump(&mut a.bets_finished))?;

    if !event.failed && !event.draw {
        update_global(staged, |global| bump(&mut global.bet_count))?;
    }
    Ok(())
}

pub fn bet_redeemed<S>(staged: &mut StagedWrites<'_, S>, event: &BetRedeemed) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let mut former_stake = Amount::ZERO;
    staged.modify::<UserBet, _>(&pair_key(&event.participant, event.bet_id), |user_bet| {
        former_stake = user_bet.user_stake;
        user_bet.redeemed = true;
        user_bet.user_stake = Amount::ZERO;
        Ok(())
    })?;

    staged.upsert::<UserFavStats, _>(event.participant.as_str(), |fav| {
        bump(&mut fav.bets_won)?;
        fav.bet_balance = fav
            .bet_balance
            .checked_add(event.profit)?
            .checked_add(former_stake)?;
        Ok(())
    })?;

    update_global(staged, |global| {
        global.bet_profit = global.bet_profit.checked_add(event.profit)?;
        Ok(())
    })
}

pub fn bet_bailout<S>(staged: &mut StagedWrites<'_, S>, event: &BetBailout) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<UserBet, _>(&pair_key(&event.participant, event.bet_id), |user_bet| {
        user_bet.user_stake = Amount::ZERO;
        Ok(())
    })?;

    staged.upsert::<UserFavStats, _>(event.participant.as_str(), |fav| {
        fav.bet_balance = fav.bet_balance.checked_add(event.user_stake)?;
        Ok(())
    })?;
    Ok(())
}

pub fn bet_proved<S>(staged: &mut StagedWrites<'_, S>, event: &BetProved) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Bet, _>(&event.bet_id.key(), |bet| {
        bet.proof_link = Some(event.proof_link.clone());
        Ok(())
    })
}
