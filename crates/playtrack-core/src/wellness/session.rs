//! Session timer implementation.
//!
//! The session timer is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Overtime -> Idle | Idle)
//! ```
//!
//! `Running -> Idle` happens on an early `stop()`. `Running -> Overtime`
//! happens when the planned countdown expires; `Overtime -> Idle` happens
//! on a manual stop or when the overtime window runs out, whichever comes
//! first. The overtime penalty fires at most once per session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    /// Planned countdown expired but the user hasn't stopped yet.
    Overtime,
}

/// What a tick observed, beyond the passage of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSignal {
    /// The planned countdown ran out; the overtime countdown began.
    OvertimeEntered,
    /// The overtime countdown ran out without a stop. The session is over
    /// and the overtime penalty is due. Emitted at most once per session.
    OvertimeExpired,
}

/// Final accounting for a session that ended via `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppedSession {
    pub planned_min: u64,
    pub elapsed_ms: u64,
    /// Whether the stop landed after the planned countdown had expired.
    pub was_overtime: bool,
}

/// Core session timer.
///
/// Operates on wall-clock deltas -- no internal thread. The caller is
/// responsible for calling `tick()` periodically. The whole struct is
/// serialized into the kv store so a CLI process can pick up where the
/// previous invocation left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    state: SessionState,
    /// Planned duration in minutes.
    planned_min: u64,
    /// Overtime window in minutes.
    overtime_min: u64,
    /// Remaining time in milliseconds for the current countdown
    /// (planned while Running, overtime while Overtime).
    remaining_ms: u64,
    /// Wall-clock start of the session (ms since epoch), for elapsed display.
    started_at_ms: Option<u64>,
    /// Timestamp (ms since epoch) of the last tick.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
    /// Guard flag: the overtime penalty has already fired for this session.
    #[serde(default)]
    overtime_penalized: bool,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            planned_min: 0,
            overtime_min: 0,
            remaining_ms: 0,
            started_at_ms: None,
            last_tick_epoch_ms: None,
            overtime_penalized: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn planned_min(&self) -> u64 {
        self.planned_min
    }

    pub fn overtime_min(&self) -> u64 {
        self.overtime_min
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Elapsed wall-clock time since the session started.
    pub fn elapsed_ms_at(&self, now_ms: u64) -> u64 {
        self.started_at_ms
            .map(|s| now_ms.saturating_sub(s))
            .unwrap_or(0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. Fails if one is already active -- overlapping
    /// sessions would silently drop a pending overtime penalty.
    pub fn start(&mut self, planned_min: u64, overtime_min: u64) -> Result<(), SessionState> {
        self.start_at(planned_min, overtime_min, now_ms())
    }

    pub fn start_at(
        &mut self,
        planned_min: u64,
        overtime_min: u64,
        now_ms: u64,
    ) -> Result<(), SessionState> {
        if self.state != SessionState::Idle {
            return Err(self.state);
        }
        self.state = SessionState::Running;
        self.planned_min = planned_min;
        self.overtime_min = overtime_min;
        self.remaining_ms = planned_min.saturating_mul(60_000);
        self.started_at_ms = Some(now_ms);
        self.last_tick_epoch_ms = Some(now_ms);
        self.overtime_penalized = false;
        Ok(())
    }

    /// Call periodically. Flushes wall-clock time into the current countdown
    /// and reports threshold crossings. A single tick can jump from Running
    /// straight past the overtime window (the CLI may not run for a while),
    /// in which case it reports `OvertimeExpired` directly.
    pub fn tick(&mut self) -> Option<TickSignal> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_ms: u64) -> Option<TickSignal> {
        if self.state == SessionState::Idle {
            return None;
        }
        let last = self.last_tick_epoch_ms.unwrap_or(now_ms);
        let elapsed = now_ms.saturating_sub(last);
        self.last_tick_epoch_ms = Some(now_ms);

        if elapsed < self.remaining_ms {
            self.remaining_ms -= elapsed;
            return None;
        }
        let overshoot = elapsed - self.remaining_ms;
        self.remaining_ms = 0;

        match self.state {
            SessionState::Running => {
                let overtime_ms = self.overtime_min.saturating_mul(60_000);
                if overshoot >= overtime_ms {
                    self.expire_overtime()
                } else {
                    self.state = SessionState::Overtime;
                    self.remaining_ms = overtime_ms - overshoot;
                    Some(TickSignal::OvertimeEntered)
                }
            }
            SessionState::Overtime => self.expire_overtime(),
            SessionState::Idle => None,
        }
    }

    /// End the session early, computing elapsed wall-clock time for display.
    /// Returns `None` when no session is active (including after the
    /// overtime window already expired the session).
    pub fn stop(&mut self) -> Option<StoppedSession> {
        self.stop_at(now_ms())
    }

    pub fn stop_at(&mut self, now_ms: u64) -> Option<StoppedSession> {
        if self.state == SessionState::Idle {
            return None;
        }
        let stopped = StoppedSession {
            planned_min: self.planned_min,
            elapsed_ms: self.elapsed_ms_at(now_ms),
            was_overtime: self.state == SessionState::Overtime,
        };
        self.reset();
        Some(stopped)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// The overtime window ran out. Ends the session; the guard flag keeps
    /// the penalty from firing twice even if ticks race past the deadline.
    fn expire_overtime(&mut self) -> Option<TickSignal> {
        if self.overtime_penalized {
            self.reset();
            return None;
        }
        self.overtime_penalized = true;
        self.reset();
        Some(TickSignal::OvertimeExpired)
    }

    /// Back to Idle. `started_at_ms` and `planned_min` are left in place so
    /// the caller can still account for the session that just ended; the
    /// next `start` overwrites them.
    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.remaining_ms = 0;
        self.last_tick_epoch_ms = None;
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = 60_000;

    #[test]
    fn start_stop_is_clean() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.state(), SessionState::Idle);

        timer.start_at(60, 30, 0).unwrap();
        assert_eq!(timer.state(), SessionState::Running);

        let stopped = timer.stop_at(5 * MIN).unwrap();
        assert_eq!(stopped.planned_min, 60);
        assert_eq!(stopped.elapsed_ms, 5 * MIN);
        assert!(!stopped.was_overtime);
        assert_eq!(timer.state(), SessionState::Idle);
    }

    #[test]
    fn start_while_active_is_rejected() {
        let mut timer = SessionTimer::new();
        timer.start_at(60, 30, 0).unwrap();
        assert_eq!(timer.start_at(30, 30, MIN), Err(SessionState::Running));
        // The original session keeps running.
        assert_eq!(timer.planned_min(), 60);
    }

    #[test]
    fn expiry_enters_overtime() {
        let mut timer = SessionTimer::new();
        timer.start_at(1, 30, 0).unwrap();

        assert_eq!(timer.tick_at(30_000), None);
        assert_eq!(timer.tick_at(MIN), Some(TickSignal::OvertimeEntered));
        assert_eq!(timer.state(), SessionState::Overtime);
        assert_eq!(timer.remaining_ms(), 30 * MIN);
    }

    #[test]
    fn overtime_expiry_ends_session_once() {
        let mut timer = SessionTimer::new();
        timer.start_at(1, 30, 0).unwrap();
        timer.tick_at(MIN);

        assert_eq!(timer.tick_at(31 * MIN), Some(TickSignal::OvertimeExpired));
        assert_eq!(timer.state(), SessionState::Idle);
        // A late stop is a no-op: the session already ended.
        assert!(timer.stop_at(32 * MIN).is_none());
    }

    #[test]
    fn single_tick_can_jump_past_both_deadlines() {
        let mut timer = SessionTimer::new();
        timer.start_at(1, 30, 0).unwrap();
        // Process slept through the planned minute and the whole window.
        assert_eq!(timer.tick_at(45 * MIN), Some(TickSignal::OvertimeExpired));
        assert_eq!(timer.state(), SessionState::Idle);
    }

    #[test]
    fn stop_during_overtime_reports_it() {
        let mut timer = SessionTimer::new();
        timer.start_at(1, 30, 0).unwrap();
        timer.tick_at(2 * MIN);
        let stopped = timer.stop_at(3 * MIN).unwrap();
        assert!(stopped.was_overtime);
        assert_eq!(stopped.elapsed_ms, 3 * MIN);
    }

    #[test]
    fn overshoot_is_carried_into_the_overtime_window() {
        let mut timer = SessionTimer::new();
        timer.start_at(1, 30, 0).unwrap();
        // 10 minutes late: 9 minutes of overtime already burned.
        assert_eq!(timer.tick_at(10 * MIN), Some(TickSignal::OvertimeEntered));
        assert_eq!(timer.remaining_ms(), 21 * MIN);
    }
}
