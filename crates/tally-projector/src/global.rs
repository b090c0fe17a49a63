//! Global singleton and per-user achievement helpers
//!
//! `GlobalStats` lives under one fixed key and is only ever reached through
//! [`update_global`], so there is exactly one place that can materialise it.
//! The global user count is tied to the first creation of a user's
//! `UserAchievements` row in [`update_achievements`].

use crate::staged::StagedWrites;
use tally_core::{
    bump, Address, EntityStore, GlobalStats, Result, UserAchievements, GLOBAL_STATS_KEY,
};

/// Mutate the global stats row, creating it on first touch
pub fn update_global<S, F>(staged: &mut StagedWrites<'_, S>, mutate: F) -> Result<()>
where
    S: EntityStore + ?Sized,
    F: FnOnce(&mut GlobalStats) -> Result<()>,
{
    staged.upsert::<GlobalStats, _>(GLOBAL_STATS_KEY, mutate)?;
    Ok(())
}

/// Make sure the global stats row exists without changing it
pub fn touch_global<S>(staged: &mut StagedWrites<'_, S>) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    update_global(staged, |_| Ok(()))
}

/// Mutate a user's achievements, counting the user globally on first sight
pub fn update_achievements<S, F>(
    staged: &mut StagedWrites<'_, S>,
    user: &Address,
    mutate: F,
) -> Result<()>
where
    S: EntityStore + ?Sized,
    F: FnOnce(&mut UserAchievements) -> Result<()>,
{
    let created = staged.upsert::<UserAchievements, _>(user.as_str(), mutate)?;
    if created {
        update_global(staged, |global| bump(&mut global.users))?;
    }
    Ok(())
}
