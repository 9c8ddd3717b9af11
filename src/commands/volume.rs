use poise::CreateReply;

use crate::playlist::ops;
use crate::utils::embed;
use crate::{Context, Error};

async fn volume_impl(ctx: Context<'_>, level: u32) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if level > 100 {
        ctx.send(
            CreateReply::default().embed(embed::error("Volume must be between 0 and 100.")),
        )
        .await?;
        return Ok(());
    }

    ops::set_volume(&ctx.data().playlists, guild_id, level as f32 / 100.0).await;
    ctx.say(format!("🔊 Volume set to {level}%.")).await?;
    Ok(())
}

/// Sets the playback volume (0-100)
#[poise::command(slash_command, guild_only)]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Volume percentage (0-100)"] level: u32,
) -> Result<(), Error> {
    volume_impl(ctx, level).await
}

/// Mutes playback, remembering the current volume
#[poise::command(slash_command, guild_only)]
pub async fn mute(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if ops::mute(&ctx.data().playlists, guild_id).await {
        ctx.say("🔇 Muted.").await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error("Already muted.")))
            .await?;
    }
    Ok(())
}

/// Restores the volume from before the mute
#[poise::command(slash_command, guild_only)]
pub async fn unmute(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if ops::unmute(&ctx.data().playlists, guild_id).await {
        let volume = ops::get_volume(&ctx.data().playlists, guild_id).await;
        ctx.say(format!("🔊 Unmuted. Volume back to {}%.", (volume * 100.0) as u32))
            .await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::error("Not muted.")))
            .await?;
    }
    Ok(())
}
