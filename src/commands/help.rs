use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::{Context, Error};

/// Shows every command grouped by what it does
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = CreateEmbed::new()
        .title("🌳 Treescord Commands")
        .field(
            "🌿 Toke Sessions",
            "`/toke` join or start a group countdown\n\
             `/earlytoke` gamble on breaking the cooldown\n\
             `/odds` attempts since your last early-toke win\n\
             `/earlytokelife` lifetime early-toke attempts",
            false,
        )
        .field(
            "📊 Stats & Achievements",
            "`/stats` your toke statistics\n\
             `/achievements` badges you've earned\n\
             `/achievementlist` every badge and how to get it\n\
             `/leaderboard` server-wide rankings",
            false,
        )
        .field(
            "📋 Playlist",
            "`/add` `/remove` `/clear` edit the shared playlist\n\
             `/view` browse it page by page\n\
             `/next` `/previous` `/jump` `/restart` move the cursor\n\
             `/shuffle` `/unshuffle` reorder it",
            false,
        )
        .field(
            "🎬 Playback",
            "`/play` play a library entry right now\n\
             `/pause` `/resume` `/stop` transport controls\n\
             `/status` what's playing\n\
             `/volume` `/mute` `/unmute` loudness\n\
             `/remote` controller with buttons",
            false,
        )
        .field(
            "📃 Media Library",
            "`/media` list the library\n`/addmedia` register a file or URL",
            false,
        )
        .color(0x57F287);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
