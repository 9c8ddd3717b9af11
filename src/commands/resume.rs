use poise::CreateReply;

use crate::player;
use crate::utils::embed;
use crate::{Context, Error};

async fn resume_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if player::resume(&ctx.data().playlists, guild_id).await {
        ctx.say("▶️ Playback resumed.").await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error("Nothing to resume.")))
            .await?;
    }
    Ok(())
}

/// Resumes paused playback
#[poise::command(slash_command, guild_only)]
pub async fn resume(ctx: Context<'_>) -> Result<(), Error> {
    resume_impl(ctx).await
}
