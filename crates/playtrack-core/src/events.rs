use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wellness::{PointsReason, SessionState};

/// Every wellness state change produces an Event.
/// The CLI prints them as JSON; frontends poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        planned_min: u64,
        /// How many sessions today, including this one.
        same_day_count: u32,
        at: DateTime<Utc>,
    },
    /// A points delta was applied and persisted.
    PointsAdjusted {
        reason: PointsReason,
        delta: i64,
        balance: u64,
        at: DateTime<Utc>,
    },
    /// Planned countdown expired; the overtime countdown began.
    OvertimeEntered {
        overtime_min: u64,
        at: DateTime<Utc>,
    },
    /// Overtime countdown expired without a manual stop.
    /// The penalty is reported separately as a PointsAdjusted event.
    OvertimeExpired {
        planned_min: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        planned_min: u64,
        elapsed_min: u64,
        /// True when the stop landed before the overtime penalty fired.
        clean: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        planned_min: u64,
        remaining_ms: u64,
        balance: u64,
        today_count: u32,
        at: DateTime<Utc>,
    },
}
