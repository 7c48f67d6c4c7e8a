//! SQLite-based local storage.
//!
//! Provides persistent storage for:
//! - Completed wellness sessions
//! - The points adjustment log
//! - A key-value store for application state

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::wellness::PointsAdjustment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessSessionRecord {
    pub id: String,
    pub planned_min: u64,
    pub elapsed_min: u64,
    /// "clean" or "overtime_expired".
    pub outcome: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsLogEntry {
    pub id: i64,
    pub reason: String,
    pub delta: i64,
    pub balance_after: u64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WellnessStats {
    pub total_sessions: u64,
    pub clean_sessions: u64,
    pub overtime_sessions: u64,
    pub total_elapsed_min: u64,
    pub today_sessions: u64,
    pub today_elapsed_min: u64,
}

/// SQLite database for wellness history and application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/playtrack/playtrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("playtrack.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS wellness_sessions (
                id          TEXT PRIMARY KEY,
                planned_min INTEGER NOT NULL,
                elapsed_min INTEGER NOT NULL,
                outcome     TEXT NOT NULL,
                started_at  TEXT NOT NULL,
                ended_at    TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS points_log (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                reason        TEXT NOT NULL,
                delta         INTEGER NOT NULL,
                balance_after INTEGER NOT NULL,
                at            TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_ended_at ON wellness_sessions(ended_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_outcome ON wellness_sessions(outcome);
            CREATE INDEX IF NOT EXISTS idx_points_log_at ON points_log(at);",
        )?;
        Ok(())
    }

    /// Record a finished wellness session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_wellness_session(
        &self,
        id: &str,
        planned_min: u64,
        elapsed_min: u64,
        outcome: &str,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO wellness_sessions (id, planned_min, elapsed_min, outcome, started_at, ended_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                planned_min,
                elapsed_min,
                outcome,
                started_at.to_rfc3339(),
                ended_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Append a points adjustment to the log.
    pub fn record_points(
        &self,
        adj: &PointsAdjustment,
        at: DateTime<Utc>,
    ) -> Result<(), rusqlite::Error> {
        let reason = match adj.reason {
            crate::wellness::PointsReason::CleanFinish => "clean_finish",
            crate::wellness::PointsReason::RepeatSession => "repeat_session",
            crate::wellness::PointsReason::OvertimeExpired => "overtime_expired",
        };
        self.conn.execute(
            "INSERT INTO points_log (reason, delta, balance_after, at) VALUES (?1, ?2, ?3, ?4)",
            params![reason, adj.delta, adj.balance_after, at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Most recent points adjustments, newest first.
    pub fn points_history(&self, limit: u32) -> Result<Vec<PointsLogEntry>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, reason, delta, balance_after, at
             FROM points_log ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(PointsLogEntry {
                id: row.get(0)?,
                reason: row.get(1)?,
                delta: row.get(2)?,
                balance_after: row.get(3)?,
                at: parse_ts(&row.get::<_, String>(4)?),
            })
        })?;
        rows.collect()
    }

    pub fn stats_today(&self) -> Result<WellnessStats, rusqlite::Error> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.stats_since(Some(format!("{today}T00:00:00+00:00")))
    }

    pub fn stats_all(&self) -> Result<WellnessStats, rusqlite::Error> {
        let mut stats = self.stats_since(None)?;
        let today = self.stats_today()?;
        stats.today_sessions = today.today_sessions;
        stats.today_elapsed_min = today.today_elapsed_min;
        Ok(stats)
    }

    fn stats_since(&self, since: Option<String>) -> Result<WellnessStats, rusqlite::Error> {
        let (filter, bound) = match &since {
            Some(ts) => ("WHERE ended_at >= ?1", ts.as_str()),
            None => ("", ""),
        };
        let sql = format!(
            "SELECT outcome, COUNT(*), COALESCE(SUM(elapsed_min), 0)
             FROM wellness_sessions {filter}
             GROUP BY outcome"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let mut stats = WellnessStats::default();
        let mut fill = |row: (String, u64, u64)| {
            let (outcome, count, minutes) = row;
            stats.total_sessions += count;
            stats.total_elapsed_min += minutes;
            match outcome.as_str() {
                "clean" => stats.clean_sessions += count,
                "overtime_expired" => stats.overtime_sessions += count,
                _ => {}
            }
            if since.is_some() {
                stats.today_sessions += count;
                stats.today_elapsed_min += minutes;
            }
        };

        if since.is_some() {
            let rows = stmt.query_map(params![bound], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u64>(2)?,
                ))
            })?;
            for row in rows {
                fill(row?);
            }
        } else {
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u64>(2)?,
                ))
            })?;
            for row in rows {
                fill(row?);
            }
        }
        Ok(stats)
    }

    /// Recent finished sessions, newest first.
    pub fn recent_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<WellnessSessionRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, planned_min, elapsed_min, outcome, started_at, ended_at
             FROM wellness_sessions ORDER BY ended_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(WellnessSessionRecord {
                id: row.get(0)?,
                planned_min: row.get(1)?,
                elapsed_min: row.get(2)?,
                outcome: row.get(3)?,
                started_at: parse_ts(&row.get::<_, String>(4)?),
                ended_at: parse_ts(&row.get::<_, String>(5)?),
            })
        })?;
        rows.collect()
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::{PointsLedger, PointsReason};

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn record_and_query_sessions() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_wellness_session("a", 60, 42, "clean", now, now)
            .unwrap();
        db.record_wellness_session("b", 30, 61, "overtime_expired", now, now)
            .unwrap();

        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.clean_sessions, 1);
        assert_eq!(stats.overtime_sessions, 1);
        assert_eq!(stats.total_elapsed_min, 103);
        assert_eq!(stats.today_sessions, 2);
    }

    #[test]
    fn points_log_is_newest_first() {
        let db = Database::open_memory().unwrap();
        let mut ledger = PointsLedger::new(0);
        let at = Utc::now();
        db.record_points(&ledger.apply(PointsReason::CleanFinish), at)
            .unwrap();
        db.record_points(&ledger.apply(PointsReason::RepeatSession), at)
            .unwrap();

        let log = db.points_history(10).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].reason, "repeat_session");
        assert_eq!(log[0].balance_after, 0);
        assert_eq!(log[1].reason, "clean_finish");
        assert_eq!(log[1].balance_after, 15);
    }
}
