use poise::CreateReply;

use crate::player;
use crate::playlist::{ops, JumpOutcome};
use crate::utils::embed;
use crate::{Context, Error};

async fn jump_impl(ctx: Context<'_>, position: usize) -> Result<(), Error> {
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
    match ops::jump(&data.playlists, guild_id, position).await {
        JumpOutcome::Play(entry) => {
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
        JumpOutcome::OutOfRange { len } => {
            ctx.send(CreateReply::default().embed(embed::error(&format!(
                "Position {position} is out of range. Valid range is 1 to {len}."
            ))))
            .await?;
        }
        JumpOutcome::Empty => {
            ctx.send(
                CreateReply::default().embed(embed::error("The shared playlist is empty.")),
            )
            .await?;
        }
    }
    Ok(())
}

/// Jumps to a playlist position and plays it
#[poise::command(slash_command, guild_only)]
pub async fn jump(
    ctx: Context<'_>,
    #[description = "Playlist position (1-based)"] position: usize,
) -> Result<(), Error> {
    jump_impl(ctx, position).await
}
