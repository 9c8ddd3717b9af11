pub mod source;

use std::sync::Arc;

use async_trait::async_trait;
use serenity::model::id::GuildId;
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::{File, Input, YoutubeDl};
use songbird::Call;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::playlist::{ops, Advance, PlaylistEntry, PlaylistManager};
use crate::Error;

fn input_for(http_client: &reqwest::Client, entry: &PlaylistEntry) -> Input {
    if entry.source.starts_with("http://") || entry.source.starts_with("https://") {
        YoutubeDl::new(http_client.clone(), entry.source.clone()).into()
    } else {
        File::new(entry.source.clone()).into()
    }
}

/// Advances the cursor when a track ends naturally, the auto-advance half of
/// the engine. Playback is requested fire-and-forget; a failed source is
/// logged and the cursor stays where the advance put it.
struct TrackEndNotifier {
    guild_id: GuildId,
    playlists: PlaylistManager,
    http_client: reqwest::Client,
    call: Arc<Mutex<Call>>,
    wrap: bool,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        let guild_id = self.guild_id;
        let playlists = self.playlists.clone();
        let http_client = self.http_client.clone();
        let call = self.call.clone();
        let wrap = self.wrap;

        tokio::spawn(async move {
            if let Err(e) = play_next(guild_id, &playlists, &http_client, &call, wrap).await {
                error!("auto-advance failed: {e}");
            }
        });

        None
    }
}

pub async fn play_entry(
    guild_id: GuildId,
    playlists: &PlaylistManager,
    http_client: &reqwest::Client,
    call: &Arc<Mutex<Call>>,
    entry: &PlaylistEntry,
    wrap: bool,
) -> Result<(), Error> {
    let src = input_for(http_client, entry);
    let volume = ops::get_volume(playlists, guild_id).await;

    let track_handle = {
        let mut handler = call.lock().await;
        let track_handle = handler.play_only(src.into());
        let _ = track_handle.set_volume(volume);

        track_handle.add_event(
            Event::Track(TrackEvent::End),
            TrackEndNotifier {
                guild_id,
                playlists: playlists.clone(),
                http_client: http_client.clone(),
                call: call.clone(),
                wrap,
            },
        )?;

        track_handle
    };

    {
        let mut guard = playlists.write().await;
        if let Some(guild) = guard.get_mut(&guild_id) {
            guild.track_handle = Some(track_handle);
        }
    }

    info!("playback started: {}", entry.title);
    Ok(())
}

/// Plays one entry immediately without moving the playlist cursor and
/// without auto-advance. Used for direct library playback.
pub async fn play_oneshot(
    guild_id: GuildId,
    playlists: &PlaylistManager,
    http_client: &reqwest::Client,
    call: &Arc<Mutex<Call>>,
    entry: &PlaylistEntry,
) -> Result<(), Error> {
    let src = input_for(http_client, entry);
    let volume = ops::get_volume(playlists, guild_id).await;

    let track_handle = {
        let mut handler = call.lock().await;
        let track_handle = handler.play_only(src.into());
        let _ = track_handle.set_volume(volume);
        track_handle
    };

    {
        let mut guard = playlists.write().await;
        let guild = guard.entry(guild_id).or_default();
        guild.track_handle = Some(track_handle);
    }

    info!("one-shot playback started: {}", entry.title);
    Ok(())
}

/// Advance the cursor and play whatever it lands on. The cursor moves even
/// when the source fails to open; the error is reported, not rolled back.
pub async fn play_next(
    guild_id: GuildId,
    playlists: &PlaylistManager,
    http_client: &reqwest::Client,
    call: &Arc<Mutex<Call>>,
    wrap: bool,
) -> Result<Advance, Error> {
    let outcome = ops::advance(playlists, guild_id, wrap).await;
    match &outcome {
        Advance::Play(entry) => {
            play_entry(guild_id, playlists, http_client, call, entry, wrap).await?;
        }
        Advance::End | Advance::Empty => {
            info!("playlist exhausted (guild: {guild_id})");
            drop_handle(playlists, guild_id).await;
        }
    }
    Ok(outcome)
}

pub async fn play_previous(
    guild_id: GuildId,
    playlists: &PlaylistManager,
    http_client: &reqwest::Client,
    call: &Arc<Mutex<Call>>,
    wrap: bool,
) -> Result<Advance, Error> {
    let outcome = ops::retreat(playlists, guild_id, wrap).await;
    if let Advance::Play(entry) = &outcome {
        play_entry(guild_id, playlists, http_client, call, entry, wrap).await?;
    }
    Ok(outcome)
}

pub async fn pause(playlists: &PlaylistManager, guild_id: GuildId) -> bool {
    let guard = playlists.read().await;
    match guard.get(&guild_id).and_then(|g| g.track_handle.as_ref()) {
        Some(handle) => {
            let _ = handle.pause();
            true
        }
        None => false,
    }
}

pub async fn resume(playlists: &PlaylistManager, guild_id: GuildId) -> bool {
    let guard = playlists.read().await;
    match guard.get(&guild_id).and_then(|g| g.track_handle.as_ref()) {
        Some(handle) => {
            let _ = handle.play();
            true
        }
        None => false,
    }
}

pub async fn stop(playlists: &PlaylistManager, guild_id: GuildId) -> bool {
    let mut guard = playlists.write().await;
    match guard.get_mut(&guild_id) {
        Some(guild) => match guild.track_handle.take() {
            Some(handle) => {
                let _ = handle.stop();
                true
            }
            None => false,
        },
        None => false,
    }
}

pub async fn is_paused(playlists: &PlaylistManager, guild_id: GuildId) -> bool {
    let handle = {
        let guard = playlists.read().await;
        guard.get(&guild_id).and_then(|g| g.track_handle.clone())
    };
    match handle {
        Some(handle) => handle
            .get_info()
            .await
            .map(|info| info.playing == songbird::tracks::PlayMode::Pause)
            .unwrap_or(false),
        None => false,
    }
}

pub async fn position_secs(playlists: &PlaylistManager, guild_id: GuildId) -> Option<u64> {
    let handle = {
        let guard = playlists.read().await;
        guard.get(&guild_id).and_then(|g| g.track_handle.clone())
    };
    match handle {
        Some(handle) => handle.get_info().await.ok().map(|info| info.position.as_secs()),
        None => None,
    }
}

async fn drop_handle(playlists: &PlaylistManager, guild_id: GuildId) {
    let mut guard = playlists.write().await;
    if let Some(guild) = guard.get_mut(&guild_id) {
        guild.track_handle = None;
    }
}
