use poise::CreateReply;
use tracing::info;

use crate::player::source;
use crate::playlist::normalize_title;
use crate::utils::{components, embed};
use crate::{Context, Error};

async fn media_impl(ctx: Context<'_>, page: Option<usize>) -> Result<(), Error> {
    let names = ctx.data().media.names();
    let page = page.unwrap_or(1).saturating_sub(1);

    ctx.send(
        CreateReply::default()
            .embed(embed::media_page(&names, page))
            .components(components::pager_components("media", page)),
    )
    .await?;
    Ok(())
}

/// Lists the media library
#[poise::command(slash_command, guild_only)]
pub async fn media(
    ctx: Context<'_>,
    #[description = "Page to show"] page: Option<usize>,
) -> Result<(), Error> {
    media_impl(ctx, page).await
}

async fn addmedia_impl(ctx: Context<'_>, name: String, source: String) -> Result<(), Error> {
    let name = normalize_title(&name);

    // Probing a URL can take a while; defer so the interaction doesn't expire.
    if source.starts_with("http://") || source.starts_with("https://") {
        ctx.defer().await?;
        match source::probe_url(&source).await {
            Ok(info) => {
                info!("probed '{}' ({:?})", info.title, info.duration);
            }
            Err(e) => {
                ctx.send(CreateReply::default().embed(embed::error(&format!(
                    "That link doesn't look playable: {e}"
                ))))
                .await?;
                return Ok(());
            }
        }
    }

    if ctx.data().media.insert(&name, &source)? {
        ctx.say(format!("📥 Added **{name}** to the media library."))
            .await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error(&format!(
            "'{name}' is already in the media library."
        ))))
        .await?;
    }
    Ok(())
}

/// Registers a new entry in the media library
#[poise::command(slash_command, guild_only)]
pub async fn addmedia(
    ctx: Context<'_>,
    #[description = "Name to register it under"] name: String,
    #[description = "File path or URL"] source: String,
) -> Result<(), Error> {
    addmedia_impl(ctx, name, source).await
}
