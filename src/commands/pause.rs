use poise::CreateReply;

use crate::player;
use crate::utils::embed;
use crate::{Context, Error};

async fn pause_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if player::pause(&ctx.data().playlists, guild_id).await {
        ctx.say("⏸️ Playback paused.").await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error("Nothing is playing.")))
            .await?;
    }
    Ok(())
}

/// Pauses playback
#[poise::command(slash_command, guild_only)]
pub async fn pause(ctx: Context<'_>) -> Result<(), Error> {
    pause_impl(ctx).await
}
