//! Task lifecycle: `Open -> (Joined)* -> Voted -> Finished -> Executed`

use crate::global::{update_achievements, update_global};
use crate::staged::StagedWrites;
use tally_core::types::event::{
    RecipientRedeemed, TaskAdded, TaskJoined, TaskProved, UserRedeemed, Voted,
};
use tally_core::{
    bump, pair_key, Amount, EntityStore, Result, Task, UserDashStats, UserFavStats, UserTask,
};

pub fn task_added<S>(staged: &mut StagedWrites<'_, S>, event: &TaskAdded) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let task_key = event.task_id.key();

    staged.create(Task {
        id: task_key.clone(),
        initiator: event.initiator.clone(),
        recipient: event.recipient.clone(),
        amount: event.amount,
        entrance_amount: event.amount,
        description: event.description.clone(),
        end_task: event.end_task,
        hashtags: event.hashtags.clone(),
        language: event.language.clone(),
        ..Default::default()
    })?;

    staged.create(UserTask {
        id: pair_key(&event.initiator, event.task_id),
        user: event.initiator.clone(),
        task: task_key,
        user_stake: event.amount,
        ..Default::default()
    })?;

    update_achievements(staged, &event.initiator, |a| bump(&mut a.tasks_created))?;
    update_global(staged, |global| bump(&mut global.task_count))
}

pub fn task_joined<S>(staged: &mut StagedWrites<'_, S>, event: &TaskJoined) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let task_key = event.task_id.key();

    staged.modify::<Task, _>(&task_key, |task| {
        bump(&mut task.participants)?;
        task.amount = task.amount.checked_add(event.amount)?;
        Ok(())
    })?;

    staged.create(UserTask {
        id: pair_key(&event.participant, event.task_id),
        user: event.participant.clone(),
        task: task_key,
        user_stake: event.amount,
        ..Default::default()
    })?;

    staged.upsert::<UserDashStats, _>(event.participant.as_str(), |dash| {
        dash.tribute = dash.tribute.checked_add(event.amount)?;
        Ok(())
    })?;

    update_achievements(staged, &event.participant, |a| bump(&mut a.tasks_joined))
}

pub fn voted<S>(staged: &mut StagedWrites<'_, S>, event: &Voted) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Task, _>(&event.task_id.key(), |task| {
        if event.vote {
            bump(&mut task.positive_votes)?;
        } else {
            bump(&mut task.negative_votes)?;
        }
        task.finished = event.finished;
        Ok(())
    })?;

    staged.modify::<UserTask, _>(&pair_key(&event.participant, event.task_id), |user_task| {
        user_task.voted = true;
        user_task.vote = event.vote;
        Ok(())
    })?;

    staged.upsert::<UserFavStats, _>(event.participant.as_str(), |fav| {
        if event.vote {
            bump(&mut fav.positive_votes)
        } else {
            bump(&mut fav.negative_votes)
        }
    })?;

    update_achievements(staged, &event.participant, |a| bump(&mut a.tasks_voted))
}

pub fn user_redeemed<S>(staged: &mut StagedWrites<'_, S>, event: &UserRedeemed) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<UserTask, _>(&pair_key(&event.participant, event.task_id), |user_task| {
        user_task.user_stake = Amount::ZERO;
        Ok(())
    })?;

    staged.upsert::<UserDashStats, _>(event.participant.as_str(), |dash| {
        dash.tribute = dash.tribute.checked_sub(event.amount)?;
        Ok(())
    })?;
    Ok(())
}

pub fn recipient_redeemed<S>(
    staged: &mut StagedWrites<'_, S>,
    event: &RecipientRedeemed,
) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Task, _>(&event.task_id.key(), |task| {
        task.executed = true;
        Ok(())
    })?;

    staged.modify::<UserTask, _>(&pair_key(&event.recipient, event.task_id), |user_task| {
        user_task.user_stake = Amount::ZERO;
        Ok(())
    })?;

    staged.upsert::<UserDashStats, _>(event.recipient.as_str(), |dash| {
        dash.profit = dash.profit.checked_add(event.amount)?;
        Ok(())
    })?;

    update_global(staged, |global| {
        global.task_profits = global.task_profits.checked_add(event.amount)?;
        Ok(())
    })
}

pub fn task_proved<S>(staged: &mut StagedWrites<'_, S>, event: &TaskProved) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.modify::<Task, _>(&event.task_id.key(), |task| {
        task.proof_link = Some(event.proof_link.clone());
        Ok(())
    })
}
