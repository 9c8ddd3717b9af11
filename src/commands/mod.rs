mod achievements;
mod add;
mod clear;
mod earlytoke;
mod help;
mod jump;
mod leaderboard;
mod media;
mod next;
mod odds;
mod pause;
mod play;
mod previous;
mod remote;
mod remove;
mod restart;
mod resume;
mod shuffle;
mod stats;
mod status;
mod stop;
mod toke;
mod unshuffle;
mod view;
mod volume;

use std::sync::Arc;

use songbird::Call;
use tokio::sync::Mutex;

use crate::{Context, Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        // toke
        toke::toke(),
        earlytoke::earlytoke(),
        odds::odds(),
        odds::earlytokelife(),
        stats::stats(),
        achievements::achievements(),
        achievements::achievementlist(),
        leaderboard::leaderboard(),
        // playlist
        add::add(),
        view::view(),
        clear::clear(),
        remove::remove(),
        next::next(),
        previous::previous(),
        jump::jump(),
        restart::restart(),
        shuffle::shuffle(),
        unshuffle::unshuffle(),
        // playback
        play::play(),
        pause::pause(),
        resume::resume(),
        stop::stop(),
        status::status(),
        volume::volume(),
        volume::mute(),
        volume::unmute(),
        // library & remote
        media::media(),
        media::addmedia(),
        remote::remote(),
    ]
}

/// Joins the author's voice channel, returning `None` (after replying) when
/// they are not in one. Playback commands start from here.
pub(crate) async fn join_author_channel(
    ctx: &Context<'_>,
) -> Result<Option<Arc<Mutex<Call>>>, Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let channel_id = {
        let guild = ctx.guild().ok_or("Could not read server info")?;
        guild
            .voice_states
            .get(&ctx.author().id)
            .and_then(|vs| vs.channel_id)
    };

    let channel_id = match channel_id {
        Some(id) => id,
        None => return Ok(None),
    };

    let manager = songbird::get(ctx.serenity_context())
        .await
        .expect("Songbird not registered");

    Ok(Some(manager.join(guild_id, channel_id).await?))
}

/// The bot's existing call in this guild, if any.
pub(crate) async fn existing_call(ctx: &Context<'_>) -> Option<Arc<Mutex<Call>>> {
    let guild_id = ctx.guild_id()?;
    let manager = songbird::get(ctx.serenity_context())
        .await
        .expect("Songbird not registered");
    manager.get(guild_id)
}
