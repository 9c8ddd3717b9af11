use poise::CreateReply;

use crate::playlist::ops;
use crate::utils::embed;
use crate::{Context, Error};

async fn remove_impl(ctx: Context<'_>, title: String) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    match ops::remove(&ctx.data().playlists, guild_id, &title).await {
        Some(entry) => {
            ctx.say(format!("➖ Removed **{}** from the playlist.", entry.title))
                .await?;
        }
        None => {
            ctx.send(CreateReply::default().embed(embed::error(&format!(
                "'{title}' is not in the playlist."
            ))))
            .await?;
        }
    }
    Ok(())
}

/// Removes an entry from the shared playlist by name
#[poise::command(slash_command, guild_only)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Title to remove"] title: String,
) -> Result<(), Error> {
    remove_impl(ctx, title).await
}
