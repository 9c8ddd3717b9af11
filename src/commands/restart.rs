use poise::CreateReply;

use crate::player;
use crate::playlist::ops;
use crate::utils::embed;
use crate::{Context, Error};

async fn restart_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let call = match super::join_author_channel(&ctx).await? {
        Some(call) => call,
        None => {
            ctx.send(
                CreateReply::default().embed(embed::error("Join a voice channel first.")),
            )
            .await?;
            return Ok(());
        }
    };

    let data = ctx.data();
    match ops::restart(&data.playlists, guild_id).await {
        Some(entry) => {
            player::play_entry(
                guild_id,
                &data.playlists,
                &data.http_client,
                &call,
                &entry,
                data.playlist_wrap,
            )
            .await?;
            ctx.say("⏮️ Restarting the playlist from the top.").await?;
            ctx.send(CreateReply::default().embed(embed::now_playing(&entry)))
                .await?;
        }
        None => {
            ctx.send(
                CreateReply::default().embed(embed::error("The shared playlist is empty.")),
            )
            .await?;
        }
    }
    Ok(())
}

/// Restarts the shared playlist from the first entry
#[poise::command(slash_command, guild_only)]
pub async fn restart(ctx: Context<'_>) -> Result<(), Error> {
    restart_impl(ctx).await
}
