//! Profile upserts against `UserDashStats`

use crate::staged::StagedWrites;
use tally_core::types::event::{
    DisplayAchievementChanged, NameRegistered, SocialRegistered, UserBlacklisted,
};
use tally_core::{EntityStore, Result, SocialChannel, UserDashStats};

pub fn name_registered<S>(staged: &mut StagedWrites<'_, S>, event: &NameRegistered) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.upsert::<UserDashStats, _>(event.user.as_str(), |dash| {
        dash.user_name = Some(event.registered_name.clone());
        Ok(())
    })?;
    Ok(())
}

pub fn social_registered<S>(
    staged: &mut StagedWrites<'_, S>,
    event: &SocialRegistered,
) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    let channel = SocialChannel::from(event.social_id);
    if let SocialChannel::Unrecognized(id) = channel {
        tracing::debug!(user = %event.user, social_id = id, "Ignoring unknown social channel");
        return Ok(());
    }

    let link = event.registered_link.clone();
    staged.upsert::<UserDashStats, _>(event.user.as_str(), |dash| {
        let slot = match channel {
            SocialChannel::Instagram => &mut dash.instagram,
            SocialChannel::Twitter => &mut dash.twitter,
            SocialChannel::TikTok => &mut dash.tiktok,
            SocialChannel::Twitch => &mut dash.twitch,
            SocialChannel::YouTube => &mut dash.youtube,
            SocialChannel::Unrecognized(_) => return Ok(()),
        };
        *slot = Some(link);
        Ok(())
    })?;
    Ok(())
}

pub fn user_blacklisted<S>(staged: &mut StagedWrites<'_, S>, event: &UserBlacklisted) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.upsert::<UserDashStats, _>(event.user.as_str(), |dash| {
        dash.blacklist.push(event.user_to_blacklist.clone());
        Ok(())
    })?;
    Ok(())
}

pub fn display_achievement_changed<S>(
    staged: &mut StagedWrites<'_, S>,
    event: &DisplayAchievementChanged,
) -> Result<()>
where
    S: EntityStore + ?Sized,
{
    staged.upsert::<UserDashStats, _>(event.user.as_str(), |dash| {
        dash.display_achievement = Some(event.achievement);
        Ok(())
    })?;
    Ok(())
}
