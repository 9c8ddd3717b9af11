use std::sync::Arc;
use std::time::{Duration, Instant};

use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId};
use tracing::error;

use super::{Participant, SessionManager, StatEvent, TickOutcome};
use crate::achievements;
use crate::config::TokeConfig;
use crate::db::achievements::AchievementsDb;
use crate::db::stats::StatsDb;
use crate::utils::embed;
use crate::Data;

/// The collaborators the background tasks need, resolved once from `Data`
/// instead of looked up ambiently.
#[derive(Clone)]
pub struct TokeRuntime {
    pub sessions: SessionManager,
    pub stats: Arc<StatsDb>,
    pub badges: Arc<AchievementsDb>,
    pub cfg: TokeConfig,
}

impl TokeRuntime {
    pub fn from_data(data: &Data) -> Self {
        Self {
            sessions: data.sessions.clone(),
            stats: data.stats.clone(),
            badges: data.achievements.clone(),
            cfg: data.toke_config,
        }
    }
}

async fn say(http: &Arc<Http>, channel_id: ChannelId, text: impl Into<String>) {
    if let Err(e) = channel_id.say(http, text.into()).await {
        error!("toke notification failed: {e}");
    }
}

/// Drains a transition's event outbox: counters first, then badge checks.
/// Best-effort throughout; a failed write or message never touches the
/// session.
pub async fn deliver_events(
    rt: &TokeRuntime,
    http: &Arc<Http>,
    channel_id: ChannelId,
    events: &[(Participant, StatEvent)],
) {
    for (user, event) in events {
        if let Err(e) = rt.stats.record(user.id, &user.name, event) {
            error!("stat event dropped for {}: {e}", user.name);
        }
        if *event == StatEvent::JoinedAt421 {
            if let Some(ach) =
                achievements::award_event_badge(&rt.badges, user.id, achievements::TOO_SLOW_421)
            {
                say(http, channel_id, embed::achievement_unlocked_line(user, ach)).await;
            }
        }
    }

    let mut checked: Vec<Participant> = Vec::new();
    for (user, _) in events {
        if checked.iter().any(|u| u.id == user.id) {
            continue;
        }
        checked.push(user.clone());
    }
    for user in checked {
        let Some(row) = rt.stats.user_stats(user.id) else {
            continue;
        };
        for ach in achievements::newly_earned(&rt.badges, user.id, &row) {
            say(http, channel_id, embed::achievement_unlocked_line(&user, ach)).await;
        }
    }
}

fn mentions(participants: &[Participant]) -> String {
    participants
        .iter()
        .map(Participant::mention)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The one-second tick task for a countdown that just started. Runs until
/// the session resolves, then hands off to the cooldown expiry task.
pub fn spawn_countdown(
    rt: TokeRuntime,
    http: Arc<Http>,
    channel_id: ChannelId,
    guild_id: GuildId,
) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;

            let outcome = {
                let mut sessions = rt.sessions.write().await;
                match sessions.get_mut(&guild_id) {
                    Some(session) => session.tick(Instant::now(), &rt.cfg),
                    None => break,
                }
            };

            match outcome {
                TickOutcome::Counting { .. } => {}
                TickOutcome::GetReady { remaining_secs } => {
                    say(&http, channel_id, format!("Get ready to toke - {remaining_secs}!"))
                        .await;
                }
                TickOutcome::Resolved(res) => {
                    let text = if res.is_solo() {
                        format!(
                            "Take a solo toke, {}. Dedication! 🍃",
                            res.participants[0].mention()
                        )
                    } else {
                        format!("Take a toke {}! 💨", mentions(&res.participants))
                    };
                    say(&http, channel_id, text).await;
                    deliver_events(&rt, &http, channel_id, &res.events).await;
                    spawn_cooldown_expiry(rt.clone(), guild_id);
                    break;
                }
                TickOutcome::NotCounting => break,
            }
        }
    });
}

/// Deferred Cooldown -> Idle reset. `finish_cooldown` re-checks the deadline,
/// so an early-toke bypass firing in the meantime is left alone.
fn spawn_cooldown_expiry(rt: TokeRuntime, guild_id: GuildId) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(rt.cfg.cooldown_secs)).await;
        let mut sessions = rt.sessions.write().await;
        if let Some(session) = sessions.get_mut(&guild_id) {
            session.finish_cooldown(Instant::now());
        }
    });
}
