use poise::CreateReply;

use crate::player;
use crate::playlist::Advance;
use crate::utils::embed;
use crate::{Context, Error};

async fn next_impl(ctx: Context<'_>) -> Result<(), Error> {
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
    let outcome = player::play_next(
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
            ctx.say("⏹️ End of playlist.").await?;
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

/// Plays the next entry in the shared playlist
#[poise::command(slash_command, guild_only)]
pub async fn next(ctx: Context<'_>) -> Result<(), Error> {
    next_impl(ctx).await
}
