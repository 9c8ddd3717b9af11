use std::sync::Mutex;

use rusqlite::{params, Connection};

/// Read-mostly name -> source-locator lookup backing the playlist and the
/// paginated library listing.
pub struct MediaDb {
    conn: Mutex<Connection>,
}

impl MediaDb {
    pub fn new(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS media (
                name TEXT PRIMARY KEY,
                file_path TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS media (
                name TEXT PRIMARY KEY,
                file_path TEXT NOT NULL
            );",
        )
        .unwrap();
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<String> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT file_path FROM media WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .ok()
    }

    pub fn insert(&self, name: &str, source: &str) -> Result<bool, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO media (name, file_path) VALUES (?1, ?2)",
            params![name, source],
        )?;
        Ok(changed > 0)
    }

    pub fn names(&self) -> Vec<String> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn.prepare("SELECT name FROM media ORDER BY name") {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("media query failed to prepare: {e}");
                return Vec::new();
            }
        };
        let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("media query failed: {e}");
                return Vec::new();
            }
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    pub fn len(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM media", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_resolve_and_list() {
        let db = MediaDb::open_in_memory();
        assert!(db.insert("trees", "/media/trees.mp4").unwrap());
        assert!(db.insert("zelda", "https://example.com/zelda").unwrap());
        assert_eq!(db.resolve("trees").as_deref(), Some("/media/trees.mp4"));
        assert_eq!(db.resolve("missing"), None);
        assert_eq!(db.names(), vec!["trees".to_string(), "zelda".to_string()]);
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let db = MediaDb::open_in_memory();
        assert!(db.insert("trees", "/media/a.mp4").unwrap());
        assert!(!db.insert("trees", "/media/b.mp4").unwrap());
        assert_eq!(db.resolve("trees").as_deref(), Some("/media/a.mp4"));
    }
}
