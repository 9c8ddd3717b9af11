use poise::CreateReply;

use crate::db::stats::LEADERBOARD_STATS;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn leaderboard_impl(ctx: Context<'_>, stat_name: Option<String>) -> Result<(), Error> {
    let mut index = 0;
    if let Some(name) = stat_name {
        let wanted = name.to_lowercase();
        match LEADERBOARD_STATS
            .iter()
            .position(|s| s.display_name.to_lowercase().contains(&wanted))
        {
            Some(found) => index = found,
            None => {
                ctx.say(format!(
                    "Stat '{name}' not found. Showing the first leaderboard."
                ))
                .await?;
            }
        }
    }

    let rows = ctx.data().stats.leaderboard(LEADERBOARD_STATS[index].key);
    ctx.send(
        CreateReply::default()
            .embed(embed::leaderboard(index, &rows))
            .components(components::pager_components("lb", index)),
    )
    .await?;
    Ok(())
}

/// Displays interactive leaderboards for all stats
#[poise::command(slash_command, guild_only)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Stat to jump to (e.g. \"solo tokes\")"] stat_name: Option<String>,
) -> Result<(), Error> {
    leaderboard_impl(ctx, stat_name).await
}
