use poise::CreateReply;

use crate::player;
use crate::playlist::Advance;
use crate::utils::embed;
use crate::{Context, Error};

async fn previous_impl(ctx: Context<'_>) -> Result<(), Error> {
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
    let outcome = player::play_previous(
        guild_id,
        &data.playlists,
        &data.http_client,
        &call,
        data.playlist_wrap,
    )
    .await?;

    match outcome {
        Advance::Play(entry) => {
            ctx.send(CreateReply::default().embed(embed::now_playing(&entry)))
                .await?;
        }
        Advance::End => {
            ctx.say("⏹️ Already at the start of the playlist.").await?;
        }
        Advance::Empty => {
            ctx.send(
                CreateReply::default().embed(embed::error("The shared playlist is empty.")),
            )
            .await?;
        }
    }
    Ok(())
}

/// Plays the previous entry in the shared playlist
#[poise::command(slash_command, guild_only)]
pub async fn previous(ctx: Context<'_>) -> Result<(), Error> {
    previous_impl(ctx).await
}
