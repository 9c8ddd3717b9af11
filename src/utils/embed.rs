use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::achievements::Achievement;
use crate::db::stats::{StatRow, LEADERBOARD_STATS};
use crate::playlist::PlaylistEntry;
use crate::toke::Participant;

pub const PAGE_SIZE: usize = 10;

pub fn error(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ Error")
        .description(message)
        .color(0xED4245)
}

pub fn format_time(total_secs: u64) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{mins}:{secs:02}")
}

pub fn now_playing(entry: &PlaylistEntry) -> CreateEmbed {
    CreateEmbed::new()
        .title("🎬 Now Playing")
        .description(entry.title.clone())
        .color(0x1DB954)
}

pub fn added_to_playlist(entry: &PlaylistEntry, position: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ Added to Playlist")
        .description(entry.title.clone())
        .field("Position", format!("#{position}"), true)
        .color(0x5865F2)
}

pub fn player_status(
    entry: Option<&PlaylistEntry>,
    is_paused: bool,
    position_secs: Option<u64>,
    volume: f32,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title("🎮 Playback Controller").color(0x3498DB);
    match entry {
        Some(entry) => {
            embed = embed
                .field("Media", entry.title.clone(), false)
                .field("Status", if is_paused { "Paused" } else { "Playing" }, true)
                .field("Volume", format!("{}%", (volume * 100.0) as u32), true);
            if let Some(secs) = position_secs {
                embed = embed.field("Elapsed", format_time(secs), true);
            }
            embed
        }
        None => embed.description("Nothing is currently playing."),
    }
}

pub fn playlist_page(
    entries: &[PlaylistEntry],
    current: Option<usize>,
    page: usize,
) -> CreateEmbed {
    let total_pages = if entries.is_empty() {
        1
    } else {
        entries.len().div_ceil(PAGE_SIZE)
    };
    let page = page.min(total_pages - 1);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(entries.len());

    let description = if entries.is_empty() {
        "The shared playlist is empty.".to_string()
    } else {
        entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let num = start + i + 1;
                if current == Some(start + i) {
                    format!("**{num}. {} ◀ now playing**", entry.title)
                } else {
                    format!("**{num}.** {}", entry.title)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title(format!("📋 Shared Playlist ({}/{total_pages})", page + 1))
        .description(description)
        .color(0x5865F2)
        .footer(CreateEmbedFooter::new(format!("{} entries", entries.len())))
}

pub fn media_page(names: &[String], page: usize) -> CreateEmbed {
    let total_pages = if names.is_empty() {
        1
    } else {
        names.len().div_ceil(PAGE_SIZE)
    };
    let page = page.min(total_pages - 1);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(names.len());

    let description = if names.is_empty() {
        "The media library is empty.".to_string()
    } else {
        names[start..end]
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {name}", start + i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title("📃 Media Library")
        .description(description)
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{total_pages}",
            page + 1
        )))
        .color(0x5865F2)
}

/// One leaderboard page per stat; `stat_index` picks the stat.
pub fn leaderboard(stat_index: usize, rows: &[(String, u64)]) -> CreateEmbed {
    let stat = &LEADERBOARD_STATS[stat_index % LEADERBOARD_STATS.len()];
    let description = if rows.is_empty() {
        "This leaderboard is empty! 💨".to_string()
    } else {
        rows.iter()
            .take(10)
            .enumerate()
            .map(|(i, (name, count))| {
                let rank = match i {
                    0 => "🥇 ".to_string(),
                    1 => "🥈 ".to_string(),
                    2 => "🥉 ".to_string(),
                    _ => format!("**{}.** ", i + 1),
                };
                format!("{rank}{name}: {count}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title(format!(
            "🏆 {} Leaderboard {} 🏆",
            stat.display_name, stat.emoji
        ))
        .description(description)
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{}",
            (stat_index % LEADERBOARD_STATS.len()) + 1,
            LEADERBOARD_STATS.len()
        )))
        .color(0xF1C40F)
}

pub fn stats_card(display_name: &str, row: &StatRow, earlytoke_lifetime: u64) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🌿 Toke Stats for {display_name} 🌿"))
        .field("Group Tokes Joined", format!("{} 💨", row.toke_count), false)
        .field(
            "Solo Tokes Completed",
            format!("{} 🍃", row.solo_toke_count),
            false,
        )
        .field("Tokes Saved", format!("{} ⏳", row.tokes_saved_count), false)
        .field(
            "4:20 Tokes Joined",
            format!("{} 🍁", row.four_twenty_tokes_count),
            false,
        )
        .field(
            "Wake and Bake Tokes",
            format!("{} ☀️", row.wake_and_bake_tokes_count),
            false,
        )
        .field(
            "Early Toke Attempts (Lifetime)",
            format!("{earlytoke_lifetime} 🚬"),
            false,
        )
        .field(
            "Toke Club Sessions",
            format!("{} 🧼", row.toke_club_sessions_count),
            false,
        )
        .color(0x57F287)
}

pub fn achievements_earned(display_name: &str, earned: &[&Achievement]) -> CreateEmbed {
    let description = if earned.is_empty() {
        "No achievements earned yet. Keep toking!".to_string()
    } else {
        earned
            .iter()
            .map(|a| format!("{} **{}**: {}", a.emoji, a.name, a.description))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    CreateEmbed::new()
        .title(format!("🏆 Achievements for {display_name} 🏆"))
        .description(description)
        .color(0xF1C40F)
}

pub fn achievements_list(catalog: &[Achievement]) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("📜 All Available Achievements 📜")
        .description("Here are all the achievements you can earn:")
        .color(0x3498DB);
    for ach in catalog.iter().filter(|a| !a.hidden) {
        embed = embed.field(
            format!("{} {}", ach.emoji, ach.name),
            format!("*{}*", ach.description),
            false,
        );
    }
    embed
}

pub fn achievement_unlocked_line(user: &Participant, ach: &Achievement) -> String {
    let prefix = if ach.hidden {
        "🏆 Hidden Achievement Unlocked!"
    } else {
        "🏆 Achievement Unlocked!"
    };
    format!(
        "{prefix} {} earned **{}**! {}\n> *{}*",
        user.mention(),
        ach.name,
        ach.emoji,
        ach.description
    )
}
