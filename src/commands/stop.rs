use poise::CreateReply;

use crate::player;
use crate::utils::embed;
use crate::{Context, Error};

async fn stop_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if player::stop(&ctx.data().playlists, guild_id).await {
        ctx.say("⏹️ Playback stopped.").await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error("Nothing is playing.")))
            .await?;
    }
    Ok(())
}

/// Stops playback without touching the playlist
#[poise::command(slash_command, guild_only)]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    stop_impl(ctx).await
}
