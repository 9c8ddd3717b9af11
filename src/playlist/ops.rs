use serenity::model::id::GuildId;

use super::{Advance, JumpOutcome, PlaylistEntry, PlaylistManager, UnshuffleOutcome};

pub async fn add(
    manager: &PlaylistManager,
    guild_id: GuildId,
    title: &str,
    source: &str,
) -> (PlaylistEntry, usize) {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    let entry = guild.list.add(title, source);
    (entry, guild.list.len())
}

pub async fn clear(manager: &PlaylistManager, guild_id: GuildId) {
    let mut playlists = manager.write().await;
    if let Some(guild) = playlists.get_mut(&guild_id) {
        guild.list.clear();
        guild.track_handle = None;
    }
}

pub async fn remove(
    manager: &PlaylistManager,
    guild_id: GuildId,
    title: &str,
) -> Option<PlaylistEntry> {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.remove(title)
}

pub async fn advance(manager: &PlaylistManager, guild_id: GuildId, wrap: bool) -> Advance {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.next(wrap)
}

pub async fn retreat(manager: &PlaylistManager, guild_id: GuildId, wrap: bool) -> Advance {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.previous(wrap)
}

pub async fn jump(
    manager: &PlaylistManager,
    guild_id: GuildId,
    one_based: usize,
) -> JumpOutcome {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.jump(one_based)
}

pub async fn restart(manager: &PlaylistManager, guild_id: GuildId) -> Option<PlaylistEntry> {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.restart()
}

pub async fn shuffle(manager: &PlaylistManager, guild_id: GuildId) -> Option<PlaylistEntry> {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.shuffle(&mut rand::thread_rng())
}

pub async fn unshuffle(manager: &PlaylistManager, guild_id: GuildId) -> UnshuffleOutcome {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.list.unshuffle()
}

/// Entries plus the cursor, for the paginated view.
pub async fn snapshot(
    manager: &PlaylistManager,
    guild_id: GuildId,
) -> (Vec<PlaylistEntry>, Option<usize>) {
    let playlists = manager.read().await;
    match playlists.get(&guild_id) {
        Some(guild) => (guild.list.entries().to_vec(), guild.list.current_index()),
        None => (Vec::new(), None),
    }
}

pub async fn current_entry(
    manager: &PlaylistManager,
    guild_id: GuildId,
) -> Option<PlaylistEntry> {
    let playlists = manager.read().await;
    playlists
        .get(&guild_id)
        .and_then(|guild| guild.list.current_entry().cloned())
}

pub async fn get_volume(manager: &PlaylistManager, guild_id: GuildId) -> f32 {
    let playlists = manager.read().await;
    playlists.get(&guild_id).map_or(0.5, |guild| guild.volume)
}

pub async fn set_volume(manager: &PlaylistManager, guild_id: GuildId, volume: f32) {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    guild.volume = volume;
    guild.muted_from = None;
    if let Some(handle) = &guild.track_handle {
        let _ = handle.set_volume(volume);
    }
}

/// Returns false if already muted.
pub async fn mute(manager: &PlaylistManager, guild_id: GuildId) -> bool {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    if guild.muted_from.is_some() {
        return false;
    }
    guild.muted_from = Some(guild.volume);
    guild.volume = 0.0;
    if let Some(handle) = &guild.track_handle {
        let _ = handle.set_volume(0.0);
    }
    true
}

/// Returns false if not muted.
pub async fn unmute(manager: &PlaylistManager, guild_id: GuildId) -> bool {
    let mut playlists = manager.write().await;
    let guild = playlists.entry(guild_id).or_default();
    match guild.muted_from.take() {
        Some(previous) => {
            guild.volume = previous;
            if let Some(handle) = &guild.track_handle {
                let _ = handle.set_volume(previous);
            }
            true
        }
        None => false,
    }
}
