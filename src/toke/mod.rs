pub mod runner;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveTime, Timelike};
use serenity::model::id::{GuildId, UserId};
use tokio::sync::RwLock;

pub use session::{EarlyStartOutcome, JoinOutcome, Resolution, Session, TickOutcome};

/// A user taking part in a session. The name is carried along so the stats
/// layer can keep `user_name` current without a Discord lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

impl Participant {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Countdown,
    Cooldown,
}

/// Qualifying events accumulated by the session core during a transition and
/// drained by the caller after the mutation commits. Delivery failure never
/// touches session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatEvent {
    Joined,
    SavedToke,
    SoloCompleted,
    GroupCompleted { group_size: usize },
    FourTwenty,
    WakeAndBake,
    JoinedAt421,
}

/// A group of this size or larger counts as a Toke Club session.
pub const TOKE_CLUB_MIN: usize = 4;

pub type SessionManager = Arc<RwLock<HashMap<GuildId, Session>>>;

pub fn new_session_manager() -> SessionManager {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Events earned purely by the wall-clock time of a join. 4:20 counts on both
/// the AM and PM side; wake-and-bake covers 05:00 through 08:59.
pub fn time_window_events(local: NaiveTime) -> Vec<StatEvent> {
    let mut events = Vec::new();
    if local.hour() % 12 == 4 && local.minute() == 20 {
        events.push(StatEvent::FourTwenty);
    }
    if (5..9).contains(&local.hour()) {
        events.push(StatEvent::WakeAndBake);
    }
    events
}

/// The hidden "You're Too Slow!" window: one minute past 4:20.
pub fn is_four_twenty_one(local: NaiveTime) -> bool {
    local.hour() % 12 == 4 && local.minute() == 21
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_four_twenty_both_sides_of_noon() {
        assert!(time_window_events(t(4, 20)).contains(&StatEvent::FourTwenty));
        assert!(time_window_events(t(16, 20)).contains(&StatEvent::FourTwenty));
        assert!(!time_window_events(t(16, 21)).contains(&StatEvent::FourTwenty));
        assert!(!time_window_events(t(15, 20)).contains(&StatEvent::FourTwenty));
    }

    #[test]
    fn test_wake_and_bake_window() {
        assert!(time_window_events(t(5, 0)).contains(&StatEvent::WakeAndBake));
        assert!(time_window_events(t(8, 59)).contains(&StatEvent::WakeAndBake));
        assert!(!time_window_events(t(9, 0)).contains(&StatEvent::WakeAndBake));
        assert!(!time_window_events(t(4, 59)).contains(&StatEvent::WakeAndBake));
    }

    #[test]
    fn test_four_twenty_one_window() {
        assert!(is_four_twenty_one(t(4, 21)));
        assert!(is_four_twenty_one(t(16, 21)));
        assert!(!is_four_twenty_one(t(16, 20)));
        assert!(!is_four_twenty_one(t(17, 21)));
    }

    #[test]
    fn test_participant_mention() {
        let p = Participant {
            id: UserId::new(42),
            name: "toker".to_string(),
        };
        assert_eq!(p.mention(), "<@42>");
    }
}
