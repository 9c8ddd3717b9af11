use poise::CreateReply;

use crate::playlist::ops;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn view_impl(ctx: Context<'_>, page: Option<usize>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let (entries, current) = ops::snapshot(&ctx.data().playlists, guild_id).await;
    let page = page.unwrap_or(1).saturating_sub(1);

    ctx.send(
        CreateReply::default()
            .embed(embed::playlist_page(&entries, current, page))
            .components(components::pager_components("view", page)),
    )
    .await?;
    Ok(())
}

/// Shows the shared playlist
#[poise::command(slash_command, guild_only)]
pub async fn view(
    ctx: Context<'_>,
    #[description = "Page to show"] page: Option<usize>,
) -> Result<(), Error> {
    view_impl(ctx, page).await
}
