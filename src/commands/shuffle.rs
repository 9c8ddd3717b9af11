use poise::CreateReply;

use crate::player;
use crate::playlist::ops;
use crate::utils::embed;
use crate::{Context, Error};

async fn shuffle_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let data = ctx.data();

    match ops::shuffle(&data.playlists, guild_id).await {
        Some(entry) => {
            ctx.say("🔀 Playlist shuffled!").await?;
            // Restart playback from the new order if the bot is in a channel.
            if let Some(call) = super::existing_call(&ctx).await {
                player::play_entry(
                    guild_id,
                    &data.playlists,
                    &data.http_client,
                    &call,
                    &entry,
                    data.playlist_wrap,
                )
                .await?;
                ctx.send(CreateReply::default().embed(embed::now_playing(&entry)))
                    .await?;
            }
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

/// Shuffles the shared playlist
#[poise::command(slash_command, guild_only)]
pub async fn shuffle(ctx: Context<'_>) -> Result<(), Error> {
    shuffle_impl(ctx).await
}
