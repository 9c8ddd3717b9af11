use std::sync::Mutex;

use rusqlite::{params, Connection};
use serenity::model::id::UserId;

use crate::toke::{StatEvent, TOKE_CLUB_MIN};

/// The stat columns a session event can land in. Kept as an enum so the
/// achievement catalog can reference columns without stringly-typed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKey {
    GroupTokes,
    SoloTokes,
    TokesSaved,
    FourTwentyTokes,
    WakeAndBakeTokes,
    TokeClubSessions,
}

impl StatKey {
    pub fn column(self) -> &'static str {
        match self {
            Self::GroupTokes => "toke_count",
            Self::SoloTokes => "solo_toke_count",
            Self::TokesSaved => "tokes_saved_count",
            Self::FourTwentyTokes => "four_twenty_tokes_count",
            Self::WakeAndBakeTokes => "wake_and_bake_tokes_count",
            Self::TokeClubSessions => "toke_club_sessions_count",
        }
    }
}

/// Event -> column mapping. Group completions below the Toke Club size and
/// the hidden 4:21 marker have no counter; they exist for notifications and
/// event-driven badges only.
pub fn column_for_event(event: &StatEvent) -> Option<StatKey> {
    match event {
        StatEvent::Joined => Some(StatKey::GroupTokes),
        StatEvent::SoloCompleted => Some(StatKey::SoloTokes),
        StatEvent::SavedToke => Some(StatKey::TokesSaved),
        StatEvent::FourTwenty => Some(StatKey::FourTwentyTokes),
        StatEvent::WakeAndBake => Some(StatKey::WakeAndBakeTokes),
        StatEvent::GroupCompleted { group_size } if *group_size >= TOKE_CLUB_MIN => {
            Some(StatKey::TokeClubSessions)
        }
        StatEvent::GroupCompleted { .. } | StatEvent::JoinedAt421 => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatRow {
    pub user_name: String,
    pub toke_count: u64,
    pub solo_toke_count: u64,
    pub tokes_saved_count: u64,
    pub four_twenty_tokes_count: u64,
    pub wake_and_bake_tokes_count: u64,
    pub toke_club_sessions_count: u64,
}

impl StatRow {
    pub fn get(&self, key: StatKey) -> u64 {
        match key {
            StatKey::GroupTokes => self.toke_count,
            StatKey::SoloTokes => self.solo_toke_count,
            StatKey::TokesSaved => self.tokes_saved_count,
            StatKey::FourTwentyTokes => self.four_twenty_tokes_count,
            StatKey::WakeAndBakeTokes => self.wake_and_bake_tokes_count,
            StatKey::TokeClubSessions => self.toke_club_sessions_count,
        }
    }
}

pub struct LeaderboardStat {
    pub key: StatKey,
    pub display_name: &'static str,
    pub emoji: &'static str,
}

pub const LEADERBOARD_STATS: &[LeaderboardStat] = &[
    LeaderboardStat {
        key: StatKey::GroupTokes,
        display_name: "Group Tokes",
        emoji: "💨",
    },
    LeaderboardStat {
        key: StatKey::SoloTokes,
        display_name: "Solo Tokes",
        emoji: "🍃",
    },
    LeaderboardStat {
        key: StatKey::TokesSaved,
        display_name: "Tokes Saved",
        emoji: "⏳",
    },
    LeaderboardStat {
        key: StatKey::FourTwentyTokes,
        display_name: "4:20 Tokes",
        emoji: "🍁",
    },
    LeaderboardStat {
        key: StatKey::WakeAndBakeTokes,
        display_name: "Wake and Bakes",
        emoji: "☀️",
    },
    LeaderboardStat {
        key: StatKey::TokeClubSessions,
        display_name: "Toke Club Sessions",
        emoji: "🧼",
    },
];

const STAT_COLUMNS: &[&str] = &[
    "toke_count",
    "solo_toke_count",
    "tokes_saved_count",
    "four_twenty_tokes_count",
    "wake_and_bake_tokes_count",
    "toke_club_sessions_count",
];

/// Per-user counters, only ever incremented. The schema is kept current by
/// attempting `ALTER TABLE ADD COLUMN` for every known stat and ignoring the
/// duplicate-column error, so adding a stat is just adding a name to
/// `STAT_COLUMNS`.
pub struct StatsDb {
    conn: Mutex<Connection>,
}

impl StatsDb {
    pub fn new(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        Self::initialize(&conn).unwrap();
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn initialize(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS toke_stats (
                user_id INTEGER PRIMARY KEY,
                user_name TEXT
            )",
            [],
        )?;
        for column in STAT_COLUMNS {
            let ddl =
                format!("ALTER TABLE toke_stats ADD COLUMN {column} INTEGER NOT NULL DEFAULT 0");
            if let Err(e) = conn.execute(&ddl, []) {
                if e.to_string().to_lowercase().contains("duplicate column name") {
                    tracing::debug!("column {column} already present in toke_stats");
                } else {
                    return Err(e);
                }
            } else {
                tracing::info!("added column {column} to toke_stats");
            }
        }
        Ok(())
    }

    /// Best-effort event sink. Events with no counter are accepted and
    /// dropped silently.
    pub fn record(
        &self,
        user_id: UserId,
        user_name: &str,
        event: &StatEvent,
    ) -> Result<(), rusqlite::Error> {
        let Some(key) = column_for_event(event) else {
            return Ok(());
        };
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO toke_stats (user_id, user_name) VALUES (?1, ?2)",
            params![user_id.get() as i64, user_name],
        )?;
        // Column names come from StatKey, never from user input.
        let sql = format!(
            "UPDATE toke_stats SET {col} = {col} + 1, user_name = ?1 WHERE user_id = ?2",
            col = key.column()
        );
        conn.execute(&sql, params![user_name, user_id.get() as i64])?;
        Ok(())
    }

    pub fn user_stats(&self, user_id: UserId) -> Option<StatRow> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT user_name, toke_count, solo_toke_count, tokes_saved_count,
                    four_twenty_tokes_count, wake_and_bake_tokes_count,
                    toke_club_sessions_count
             FROM toke_stats WHERE user_id = ?1",
            params![user_id.get() as i64],
            |row| {
                Ok(StatRow {
                    user_name: row.get(0)?,
                    toke_count: row.get::<_, i64>(1)? as u64,
                    solo_toke_count: row.get::<_, i64>(2)? as u64,
                    tokes_saved_count: row.get::<_, i64>(3)? as u64,
                    four_twenty_tokes_count: row.get::<_, i64>(4)? as u64,
                    wake_and_bake_tokes_count: row.get::<_, i64>(5)? as u64,
                    toke_club_sessions_count: row.get::<_, i64>(6)? as u64,
                })
            },
        )
        .ok()
    }

    /// Descending (user_name, count) pairs for one stat, zeros excluded.
    pub fn leaderboard(&self, key: StatKey) -> Vec<(String, u64)> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT user_name, {col} FROM toke_stats WHERE {col} > 0 ORDER BY {col} DESC",
            col = key.column()
        );
        let mut stmt = match conn.prepare(&sql) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("leaderboard query failed to prepare: {e}");
                return Vec::new();
            }
        };
        let rows = match stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        }) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("leaderboard query failed: {e}");
                return Vec::new();
            }
        };
        rows.filter_map(|r| r.ok()).collect()
    }
}
