use poise::CreateReply;

use crate::player;
use crate::playlist::{normalize_title, PlaylistEntry};
use crate::utils::embed;
use crate::{Context, Error};

async fn play_impl(ctx: Context<'_>, media_name: String) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let media_name = normalize_title(&media_name);
    let source = match ctx.data().media.resolve(&media_name) {
        Some(path) => path,
        None => {
            ctx.send(CreateReply::default().embed(embed::error(&format!(
                "'{media_name}' is not in the media library. Try /media."
            ))))
            .await?;
            return Ok(());
        }
    };

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

    let entry = PlaylistEntry {
        title: media_name,
        source,
    };
    let data = ctx.data();
    player::play_oneshot(guild_id, &data.playlists, &data.http_client, &call, &entry).await?;

    ctx.send(CreateReply::default().embed(embed::now_playing(&entry)))
        .await?;
    Ok(())
}

/// Plays a media library entry immediately, leaving the playlist alone
#[poise::command(slash_command, guild_only)]
pub async fn play(
    ctx: Context<'_>,
    #[description = "Name of the media to play"] media_name: String,
) -> Result<(), Error> {
    play_impl(ctx, media_name).await
}
