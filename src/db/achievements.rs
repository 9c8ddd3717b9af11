use std::sync::Mutex;

use rusqlite::{params, Connection};
use serenity::model::id::UserId;

/// Earned-badge flags plus the early-toke attempt counters. Badges are
/// awarded with `INSERT OR IGNORE`, so awarding is idempotent and the
/// returned bool reports whether the badge is newly earned.
pub struct AchievementsDb {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user_achievements (
        user_id INTEGER NOT NULL,
        achievement_id TEXT NOT NULL,
        timestamp_earned DATETIME DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (user_id, achievement_id)
    );
    CREATE TABLE IF NOT EXISTS earlytoke_attempts (
        user_id INTEGER PRIMARY KEY,
        attempts INTEGER DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS earlytoke_lifetime (
        user_id INTEGER PRIMARY KEY,
        count INTEGER DEFAULT 0
    );
";

impl AchievementsDb {
    pub fn new(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn has(&self, user_id: UserId, achievement_id: &str) -> bool {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT 1 FROM user_achievements WHERE user_id = ?1 AND achievement_id = ?2",
            params![user_id.get() as i64, achievement_id],
            |_| Ok(()),
        )
        .is_ok()
    }

    /// True when the badge was not already held.
    pub fn award(&self, user_id: UserId, achievement_id: &str) -> Result<bool, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO user_achievements (user_id, achievement_id) VALUES (?1, ?2)",
            params![user_id.get() as i64, achievement_id],
        )?;
        Ok(changed > 0)
    }

    /// Earned badge ids in the order they were earned.
    pub fn earned(&self, user_id: UserId) -> Vec<String> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn.prepare(
            "SELECT achievement_id FROM user_achievements
             WHERE user_id = ?1 ORDER BY timestamp_earned ASC",
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("achievements query failed to prepare: {e}");
                return Vec::new();
            }
        };
        let rows = match stmt.query_map(params![user_id.get() as i64], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("achievements query failed: {e}");
                return Vec::new();
            }
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    pub fn earlytoke_attempts(&self, user_id: UserId) -> u64 {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT attempts FROM earlytoke_attempts WHERE user_id = ?1",
            params![user_id.get() as i64],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n as u64)
        .unwrap_or(0)
    }

    pub fn increment_earlytoke_attempts(&self, user_id: UserId) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO earlytoke_attempts (user_id, attempts) VALUES (?1, 1)
             ON CONFLICT(user_id) DO UPDATE SET attempts = attempts + 1",
            params![user_id.get() as i64],
        )?;
        Ok(())
    }

    pub fn reset_earlytoke_attempts(&self, user_id: UserId) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE earlytoke_attempts SET attempts = 0 WHERE user_id = ?1",
            params![user_id.get() as i64],
        )?;
        Ok(())
    }

    pub fn earlytoke_lifetime(&self, user_id: UserId) -> u64 {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT count FROM earlytoke_lifetime WHERE user_id = ?1",
            params![user_id.get() as i64],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n as u64)
        .unwrap_or(0)
    }

    pub fn increment_earlytoke_lifetime(&self, user_id: UserId) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO earlytoke_lifetime (user_id, count) VALUES (?1, 1)
             ON CONFLICT(user_id) DO UPDATE SET count = count + 1",
            params![user_id.get() as i64],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn test_award_is_idempotent() {
        let db = AchievementsDb::open_in_memory();
        assert!(!db.has(uid(1), "first_dab"));
        assert!(db.award(uid(1), "first_dab").unwrap());
        assert!(!db.award(uid(1), "first_dab").unwrap());
        assert!(db.has(uid(1), "first_dab"));
        assert_eq!(db.earned(uid(1)), vec!["first_dab".to_string()]);
    }

    #[test]
    fn test_attempt_counters_reset_independently_of_lifetime() {
        let db = AchievementsDb::open_in_memory();
        for _ in 0..3 {
            db.increment_earlytoke_attempts(uid(1)).unwrap();
            db.increment_earlytoke_lifetime(uid(1)).unwrap();
        }
        assert_eq!(db.earlytoke_attempts(uid(1)), 3);
        assert_eq!(db.earlytoke_lifetime(uid(1)), 3);

        db.reset_earlytoke_attempts(uid(1)).unwrap();
        assert_eq!(db.earlytoke_attempts(uid(1)), 0);
        assert_eq!(db.earlytoke_lifetime(uid(1)), 3);
    }
}
