use poise::CreateReply;

use crate::player;
use crate::playlist::ops;
use crate::utils::embed;
use crate::{Context, Error};

async fn status_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let data = ctx.data();

    let entry = ops::current_entry(&data.playlists, guild_id).await;
    let is_paused = player::is_paused(&data.playlists, guild_id).await;
    let position = player::position_secs(&data.playlists, guild_id).await;
    let volume = ops::get_volume(&data.playlists, guild_id).await;

    ctx.send(CreateReply::default().embed(embed::player_status(
        entry.as_ref(),
        is_paused,
        position,
        volume,
    )))
    .await?;
    Ok(())
}

/// Shows what's playing, elapsed time and volume
#[poise::command(slash_command, guild_only)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    status_impl(ctx).await
}
