use poise::CreateReply;

use crate::playlist::{normalize_title, ops};
use crate::utils::embed;
use crate::{Context, Error};

async fn add_impl(ctx: Context<'_>, media_name: String) -> Result<(), Error> {
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

    let (entry, position) = ops::add(&ctx.data().playlists, guild_id, &media_name, &source).await;
    ctx.send(CreateReply::default().embed(embed::added_to_playlist(&entry, position)))
        .await?;
    Ok(())
}

/// Adds a media library entry to the shared playlist
#[poise::command(slash_command, guild_only)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Name of the media to add"] media_name: String,
) -> Result<(), Error> {
    add_impl(ctx, media_name).await
}
