use crate::playlist::ops;
use crate::{Context, Error};

async fn clear_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    crate::player::stop(&ctx.data().playlists, guild_id).await;
    ops::clear(&ctx.data().playlists, guild_id).await;

    ctx.say("🗑️ Playlist cleared.").await?;
    Ok(())
}

/// Clears the shared playlist and stops playback
#[poise::command(slash_command, guild_only)]
pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    clear_impl(ctx).await
}
