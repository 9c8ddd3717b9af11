use poise::CreateReply;

use crate::player;
use crate::playlist::ops;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn remote_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let data = ctx.data();

    let entry = ops::current_entry(&data.playlists, guild_id).await;
    let is_paused = player::is_paused(&data.playlists, guild_id).await;
    let position = player::position_secs(&data.playlists, guild_id).await;
    let volume = ops::get_volume(&data.playlists, guild_id).await;

    ctx.send(
        CreateReply::default()
            .embed(embed::player_status(entry.as_ref(), is_paused, position, volume))
            .components(components::remote_components(is_paused)),
    )
    .await?;
    Ok(())
}

/// Posts the playback controller with transport buttons
#[poise::command(slash_command, guild_only)]
pub async fn remote(ctx: Context<'_>) -> Result<(), Error> {
    remote_impl(ctx).await
}
