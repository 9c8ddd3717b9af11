use poise::serenity_prelude as serenity;
use poise::CreateReply;

use crate::achievements::{self, Achievement, CATALOG};
use crate::utils::embed;
use crate::{Context, Error};

async fn achievements_impl(ctx: Context<'_>, user: Option<serenity::User>) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    let earned_ids = ctx.data().achievements.earned(target.id);
    let earned: Vec<&Achievement> = earned_ids
        .iter()
        .filter_map(|id| achievements::find(id))
        .collect();

    ctx.send(CreateReply::default().embed(embed::achievements_earned(&target.name, &earned)))
        .await?;
    Ok(())
}

/// Displays your or another user's earned achievements
#[poise::command(slash_command, guild_only)]
pub async fn achievements(
    ctx: Context<'_>,
    #[description = "User to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    achievements_impl(ctx, user).await
}

/// Lists all available achievements and how to earn them
#[poise::command(slash_command, guild_only)]
pub async fn achievementlist(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(CreateReply::default().embed(embed::achievements_list(CATALOG)))
        .await?;
    Ok(())
}
