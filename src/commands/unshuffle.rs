use poise::CreateReply;

use crate::playlist::{ops, UnshuffleOutcome};
use crate::utils::embed;
use crate::{Context, Error};

async fn unshuffle_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    match ops::unshuffle(&ctx.data().playlists, guild_id).await {
        UnshuffleOutcome::Restored => {
            ctx.say("🔁 Playlist restored to its original order.").await?;
        }
        UnshuffleOutcome::NothingToRestore => {
            ctx.send(
                CreateReply::default().embed(embed::error("The playlist hasn't been shuffled.")),
            )
            .await?;
        }
    }
    Ok(())
}

/// Restores the shared playlist to its pre-shuffle order
#[poise::command(slash_command, guild_only)]
pub async fn unshuffle(ctx: Context<'_>) -> Result<(), Error> {
    unshuffle_impl(ctx).await
}
