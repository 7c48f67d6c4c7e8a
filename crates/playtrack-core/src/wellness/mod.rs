//! Wellness session tracking.
//!
//! Ties the session timer, the points ledger, and the day marker together
//! behind a load/mutate/save cycle against the local database. Every points
//! mutation is persisted before the call returns.

mod day;
mod points;
mod session;

pub use day::{day_key, DayMarker};
pub use points::{PointsAdjustment, PointsLedger, PointsReason};
pub use session::{SessionState, SessionTimer, StoppedSession, TickSignal};

use chrono::{Local, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::Database;

const STATE_KEY: &str = "wellness_state";

/// The persisted wellness state, serialized as one kv entry.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WellnessState {
    pub timer: SessionTimer,
    pub ledger: PointsLedger,
    pub day: DayMarker,
}

/// Facade over the wellness state machine.
///
/// Loads state from the database, applies one command, persists, and hands
/// back the events the command produced. Frontends never touch the pieces
/// directly.
pub struct WellnessTracker<'a> {
    db: &'a Database,
    state: WellnessState,
}

impl<'a> WellnessTracker<'a> {
    /// Load persisted state, or start fresh when none exists yet.
    pub fn load(db: &'a Database) -> Result<Self> {
        let state = match db.kv_get(STATE_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => WellnessState::default(),
        };
        Ok(Self { db, state })
    }

    pub fn balance(&self) -> u64 {
        self.state.ledger.balance()
    }

    pub fn session_state(&self) -> SessionState {
        self.state.timer.state()
    }

    /// Begin a session of `planned_min` minutes with the given overtime
    /// window. A second start on the same calendar day costs points before
    /// the session begins.
    pub fn start(&mut self, planned_min: u64, overtime_min: u64) -> Result<Vec<Event>> {
        self.start_at(planned_min, overtime_min, wall_ms(), Local::now().date_naive())
    }

    pub fn start_at(
        &mut self,
        planned_min: u64,
        overtime_min: u64,
        now_ms: u64,
        today: NaiveDate,
    ) -> Result<Vec<Event>> {
        if planned_min == 0 {
            return Err(ValidationError::InvalidDuration(planned_min).into());
        }
        if self.state.timer.is_active() {
            return Err(ValidationError::SessionActive.into());
        }

        let mut events = Vec::new();
        let prior_today = self.state.day.register_start(today);
        if prior_today >= 1 {
            events.push(self.adjust_points(PointsReason::RepeatSession)?);
        }

        self.state
            .timer
            .start_at(planned_min, overtime_min, now_ms)
            .map_err(|_| ValidationError::SessionActive)?;
        events.push(Event::SessionStarted {
            planned_min,
            same_day_count: prior_today + 1,
            at: Utc::now(),
        });

        self.save()?;
        Ok(events)
    }

    /// Flush wall-clock time through the timer. Crossing the planned
    /// deadline enters overtime; crossing the overtime deadline ends the
    /// session and costs points, exactly once.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        self.tick_at(wall_ms())
    }

    pub fn tick_at(&mut self, now_ms: u64) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        match self.state.timer.tick_at(now_ms) {
            Some(TickSignal::OvertimeEntered) => {
                events.push(Event::OvertimeEntered {
                    overtime_min: self.state.timer.overtime_min(),
                    at: Utc::now(),
                });
            }
            Some(TickSignal::OvertimeExpired) => {
                let planned_min = self.state.timer.planned_min();
                events.push(Event::OvertimeExpired {
                    planned_min,
                    at: Utc::now(),
                });
                events.push(self.adjust_points(PointsReason::OvertimeExpired)?);
                self.record_session(
                    planned_min,
                    self.state.timer.elapsed_ms_at(now_ms) / 60_000,
                    "overtime_expired",
                    now_ms,
                )?;
            }
            None => {}
        }
        self.save()?;
        Ok(events)
    }

    /// End the active session. A stop that lands before the overtime
    /// penalty fired is a clean finish and earns points.
    pub fn stop(&mut self) -> Result<Vec<Event>> {
        self.stop_at(wall_ms())
    }

    pub fn stop_at(&mut self, now_ms: u64) -> Result<Vec<Event>> {
        // Flush time first so a stop after the overtime deadline settles
        // the penalty instead of counting as clean.
        let mut events = self.tick_at(now_ms)?;

        let Some(stopped) = self.state.timer.stop_at(now_ms) else {
            return Ok(events);
        };
        let elapsed_min = stopped.elapsed_ms / 60_000;
        events.push(Event::SessionStopped {
            planned_min: stopped.planned_min,
            elapsed_min,
            clean: true,
            at: Utc::now(),
        });
        events.push(self.adjust_points(PointsReason::CleanFinish)?);
        self.record_session(stopped.planned_min, elapsed_min, "clean", now_ms)?;

        self.save()?;
        Ok(events)
    }

    /// Current state, for display. Does not advance the clock.
    pub fn snapshot(&self) -> Event {
        self.snapshot_at(Local::now().date_naive())
    }

    pub fn snapshot_at(&self, today: NaiveDate) -> Event {
        Event::StateSnapshot {
            state: self.state.timer.state(),
            planned_min: self.state.timer.planned_min(),
            remaining_ms: self.state.timer.remaining_ms(),
            balance: self.state.ledger.balance(),
            today_count: self.state.day.count_for(today),
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn adjust_points(&mut self, reason: PointsReason) -> Result<Event> {
        let adj = self.state.ledger.apply(reason);
        let at = Utc::now();
        self.db.record_points(&adj, at)?;
        Ok(Event::PointsAdjusted {
            reason: adj.reason,
            delta: adj.delta,
            balance: adj.balance_after,
            at,
        })
    }

    fn record_session(
        &self,
        planned_min: u64,
        elapsed_min: u64,
        outcome: &str,
        ended_ms: u64,
    ) -> Result<()> {
        let ended_at = Utc
            .timestamp_millis_opt(ended_ms as i64)
            .single()
            .unwrap_or_else(Utc::now);
        let started_at = ended_at - chrono::Duration::minutes(elapsed_min as i64);
        self.db.record_wellness_session(
            &Uuid::new_v4().to_string(),
            planned_min,
            elapsed_min,
            outcome,
            started_at,
            ended_at,
        )?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.state)?;
        self.db.kv_set(STATE_KEY, &json)?;
        Ok(())
    }
}

fn wall_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = 60_000;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn tracker(db: &Database) -> WellnessTracker<'_> {
        WellnessTracker::load(db).unwrap()
    }

    #[test]
    fn immediate_stop_awards_fifteen() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.start_at(60, 30, 0, date(7)).unwrap();
        t.stop_at(MIN).unwrap();
        assert_eq!(t.balance(), 15);
    }

    #[test]
    fn second_session_same_day_costs_twenty() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.state.ledger = PointsLedger::new(100);
        t.start_at(60, 30, 0, date(7)).unwrap();
        t.stop_at(MIN).unwrap();
        assert_eq!(t.balance(), 115);

        let events = t.start_at(60, 30, 2 * MIN, date(7)).unwrap();
        // Penalty lands before the session begins.
        assert!(matches!(
            events[0],
            Event::PointsAdjusted {
                reason: PointsReason::RepeatSession,
                delta: -20,
                ..
            }
        ));
        t.stop_at(3 * MIN).unwrap();
        // 115 - 20 + 15
        assert_eq!(t.balance(), 110);
    }

    #[test]
    fn penalty_saturates_at_the_floor() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.start_at(60, 30, 0, date(7)).unwrap();
        t.stop_at(MIN).unwrap();
        assert_eq!(t.balance(), 15);

        // -20 against a balance of 15 stops at zero, then the clean stop
        // earns its 15 back.
        t.start_at(60, 30, 2 * MIN, date(7)).unwrap();
        assert_eq!(t.balance(), 0);
        t.stop_at(3 * MIN).unwrap();
        assert_eq!(t.balance(), 15);
    }

    #[test]
    fn next_day_does_not_cost() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.start_at(60, 30, 0, date(7)).unwrap();
        t.stop_at(MIN).unwrap();
        let events = t.start_at(60, 30, 2 * MIN, date(8)).unwrap();
        assert!(matches!(events[0], Event::SessionStarted { .. }));
    }

    #[test]
    fn overtime_expiry_costs_ten_once() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.state.ledger = PointsLedger::new(100);
        t.start_at(1, 30, 0, date(7)).unwrap();

        t.tick_at(MIN).unwrap();
        t.tick_at(31 * MIN).unwrap();
        assert_eq!(t.balance(), 90);
        // Further ticks and a late stop change nothing.
        t.tick_at(32 * MIN).unwrap();
        t.stop_at(33 * MIN).unwrap();
        assert_eq!(t.balance(), 90);
    }

    #[test]
    fn stop_after_deadline_settles_penalty_not_reward() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.state.ledger = PointsLedger::new(100);
        t.start_at(1, 30, 0, date(7)).unwrap();
        // No intermediate ticks: the stop itself flushes the clock.
        t.stop_at(45 * MIN).unwrap();
        assert_eq!(t.balance(), 90);
    }

    #[test]
    fn state_survives_reload() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.start_at(60, 30, 0, date(7)).unwrap();
        t.stop_at(MIN).unwrap();
        drop(t);

        let t2 = tracker(&db);
        assert_eq!(t2.balance(), 15);
        assert_eq!(t2.session_state(), SessionState::Idle);
    }

    #[test]
    fn start_while_running_is_an_error() {
        let db = Database::open_memory().unwrap();
        let mut t = tracker(&db);
        t.start_at(60, 30, 0, date(7)).unwrap();
        assert!(t.start_at(30, 30, MIN, date(7)).is_err());
    }
}
