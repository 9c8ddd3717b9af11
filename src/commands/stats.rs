use poise::serenity_prelude as serenity;
use poise::CreateReply;

use crate::utils::embed;
use crate::{Context, Error};

async fn stats_impl(ctx: Context<'_>, user: Option<serenity::User>) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    match ctx.data().stats.user_stats(target.id) {
        Some(row) => {
            let lifetime = ctx.data().achievements.earlytoke_lifetime(target.id);
            ctx.send(
                CreateReply::default().embed(embed::stats_card(&target.name, &row, lifetime)),
            )
            .await?;
        }
        None => {
            ctx.say(format!(
                "{} hasn't participated in any tokes yet. 🤷",
                target.name
            ))
            .await?;
        }
    }

    Ok(())
}

/// Displays your or another user's toke statistics
#[poise::command(slash_command, guild_only)]
pub async fn stats(
    ctx: Context<'_>,
    #[description = "User to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    stats_impl(ctx, user).await
}
