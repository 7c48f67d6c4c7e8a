//! Wellness points ledger.
//!
//! The balance is an unsigned integer with a hard floor of zero and no
//! ceiling. It only moves by the fixed deltas below, and every adjustment
//! is reported so the caller can persist it immediately.

use serde::{Deserialize, Serialize};

/// Why the balance moved. Each reason carries a fixed delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsReason {
    /// Session stopped before the overtime penalty fired.
    CleanFinish,
    /// A second (or later) session started on the same calendar day.
    RepeatSession,
    /// The overtime window ran out without a manual stop.
    OvertimeExpired,
}

impl PointsReason {
    /// Fixed signed delta for this reason.
    pub fn delta(&self) -> i64 {
        match self {
            PointsReason::CleanFinish => 15,
            PointsReason::RepeatSession => -20,
            PointsReason::OvertimeExpired => -10,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PointsReason::CleanFinish => "Session finished cleanly",
            PointsReason::RepeatSession => "Repeat session today",
            PointsReason::OvertimeExpired => "Overtime window expired",
        }
    }
}

/// A single applied adjustment, ready to be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsAdjustment {
    pub reason: PointsReason,
    /// The nominal delta. The balance floor can absorb part of a penalty.
    pub delta: i64,
    pub balance_after: u64,
}

/// The persisted points balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointsLedger {
    balance: u64,
}

impl PointsLedger {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Apply a reason's fixed delta, clamped at the zero floor.
    pub fn apply(&mut self, reason: PointsReason) -> PointsAdjustment {
        let delta = reason.delta();
        self.balance = if delta >= 0 {
            self.balance.saturating_add(delta as u64)
        } else {
            self.balance.saturating_sub(delta.unsigned_abs())
        };
        PointsAdjustment {
            reason,
            delta,
            balance_after: self.balance,
        }
    }
}
