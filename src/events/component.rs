use poise::serenity_prelude as serenity;
use serenity::builder::{
    CreateActionRow, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::ComponentInteraction;
use serenity::model::id::GuildId;

use crate::db::stats::LEADERBOARD_STATS;
use crate::player;
use crate::playlist::ops;
use crate::utils::{components, embed};
use crate::{Data, Error};

async fn respond_ephemeral(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed::error(message))
            .ephemeral(true),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

async fn update_message(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    embed: CreateEmbed,
    components: Vec<CreateActionRow>,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(components),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

/// Strips the buttons but leaves the embed in place.
async fn close_pager(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new().components(Vec::new()),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

fn step_page(direction: &str, page: usize, total_pages: usize) -> usize {
    match direction {
        "next" => (page + 1).min(total_pages.saturating_sub(1)),
        "prev" => page.saturating_sub(1),
        _ => page,
    }
}

pub async fn handle(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let guild_id = interaction
        .guild_id
        .ok_or("Components only work in a server")?;

    let custom_id = interaction.data.custom_id.clone();

    if custom_id.starts_with("remote_") {
        return handle_remote(ctx, interaction, data, guild_id, &custom_id).await;
    }

    if let Some((direction, page)) = components::parse_pager_id(&custom_id, "media") {
        if direction == "close" {
            return close_pager(ctx, interaction).await;
        }
        let names = data.media.names();
        let total_pages = names.len().div_ceil(embed::PAGE_SIZE).max(1);
        let page = step_page(direction, page, total_pages);
        return update_message(
            ctx,
            interaction,
            embed::media_page(&names, page),
            components::pager_components("media", page),
        )
        .await;
    }

    if let Some((direction, page)) = components::parse_pager_id(&custom_id, "view") {
        if direction == "close" {
            return close_pager(ctx, interaction).await;
        }
        let (entries, current) = ops::snapshot(&data.playlists, guild_id).await;
        let total_pages = entries.len().div_ceil(embed::PAGE_SIZE).max(1);
        let page = step_page(direction, page, total_pages);
        return update_message(
            ctx,
            interaction,
            embed::playlist_page(&entries, current, page),
            components::pager_components("view", page),
        )
        .await;
    }

    // Leaderboard pages cycle through the stats rather than clamping.
    if let Some((direction, index)) = components::parse_pager_id(&custom_id, "lb") {
        if direction == "close" {
            return close_pager(ctx, interaction).await;
        }
        let count = LEADERBOARD_STATS.len();
        let index = match direction {
            "next" => (index + 1) % count,
            "prev" => (index + count - 1) % count,
            _ => index,
        };
        let rows = data.stats.leaderboard(LEADERBOARD_STATS[index].key);
        return update_message(
            ctx,
            interaction,
            embed::leaderboard(index, &rows),
            components::pager_components("lb", index),
        )
        .await;
    }

    Ok(())
}

async fn remote_status(
    data: &Data,
    guild_id: GuildId,
) -> (CreateEmbed, Vec<CreateActionRow>) {
    let entry = ops::current_entry(&data.playlists, guild_id).await;
    let is_paused = player::is_paused(&data.playlists, guild_id).await;
    let position = player::position_secs(&data.playlists, guild_id).await;
    let volume = ops::get_volume(&data.playlists, guild_id).await;
    (
        embed::player_status(entry.as_ref(), is_paused, position, volume),
        components::remote_components(is_paused),
    )
}

async fn handle_remote(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
    guild_id: GuildId,
    custom_id: &str,
) -> Result<(), Error> {
    let manager = songbird::get(ctx).await.expect("Songbird not registered");

    let call = match manager.get(guild_id) {
        Some(call) => call,
        None => {
            respond_ephemeral(ctx, interaction, "The bot is not in a voice channel.").await?;
            return Ok(());
        }
    };

    // Transport buttons only work from inside the bot's channel.
    let bot_channel = {
        let handler = call.lock().await;
        handler.current_channel()
    };
    let user_in_bot_channel = {
        let guild = ctx
            .cache
            .guild(guild_id)
            .ok_or("Could not read server info")?;
        match bot_channel {
            Some(bot_ch) => guild
                .voice_states
                .get(&interaction.user.id)
                .and_then(|vs| vs.channel_id)
                .is_some_and(|ch| ch.get() == bot_ch.0.get()),
            None => false,
        }
    };
    if !user_in_bot_channel {
        respond_ephemeral(
            ctx,
            interaction,
            "You need to be in the bot's voice channel to use the remote.",
        )
        .await?;
        return Ok(());
    }

    match custom_id {
        "remote_pause" => {
            player::pause(&data.playlists, guild_id).await;
        }
        "remote_resume" => {
            player::resume(&data.playlists, guild_id).await;
        }
        "remote_next" => {
            if let Err(e) = player::play_next(
                guild_id,
                &data.playlists,
                &data.http_client,
                &call,
                data.playlist_wrap,
            )
            .await
            {
                respond_ephemeral(ctx, interaction, &format!("Skip failed: {e}")).await?;
                return Ok(());
            }
        }
        "remote_previous" => {
            if let Err(e) = player::play_previous(
                guild_id,
                &data.playlists,
                &data.http_client,
                &call,
                data.playlist_wrap,
            )
            .await
            {
                respond_ephemeral(ctx, interaction, &format!("Back failed: {e}")).await?;
                return Ok(());
            }
        }
        "remote_stop" => {
            player::stop(&data.playlists, guild_id).await;
        }
        _ => {}
    }

    let (status, controls) = remote_status(data, guild_id).await;
    update_message(ctx, interaction, status, controls).await?;
    Ok(())
}
