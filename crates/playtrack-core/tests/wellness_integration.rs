//! End-to-end wellness scenarios against an in-memory database.
//!
//! The worked examples follow the points rules exactly: +15 for a clean
//! stop, -20 for a second same-day start, -10 for letting the overtime
//! window run out.

use chrono::NaiveDate;
use playtrack_core::storage::Database;
use playtrack_core::wellness::{PointsLedger, SessionState, WellnessState, WellnessTracker};
use proptest::prelude::*;

const MIN: u64 = 60_000;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

/// Seed the persisted state with a starting balance, then load it the way
/// a frontend would.
fn tracker_with_balance(db: &Database, balance: u64) -> WellnessTracker<'_> {
    let state = WellnessState {
        ledger: PointsLedger::new(balance),
        ..Default::default()
    };
    db.kv_set("wellness_state", &serde_json::to_string(&state).unwrap())
        .unwrap();
    WellnessTracker::load(db).unwrap()
}

#[test]
fn clean_stop_then_repeat_session_example() {
    let db = Database::open_memory().unwrap();
    let mut t = tracker_with_balance(&db, 100);

    // balance=100, start(60), immediately stop -> 115
    t.start_at(60, 30, 0, date(6)).unwrap();
    t.stop_at(1_000).unwrap();
    assert_eq!(t.balance(), 115);

    // Second session same day, clean stop -> 115 - 20 + 15 = 110
    t.start_at(60, 30, 2 * MIN, date(6)).unwrap();
    t.stop_at(3 * MIN).unwrap();
    assert_eq!(t.balance(), 110);
}

#[test]
fn overtime_runout_example() {
    let db = Database::open_memory().unwrap();
    let mut t = tracker_with_balance(&db, 100);

    // balance=100, start(1), run past expiry and the 30-minute window -> 90
    t.start_at(1, 30, 0, date(6)).unwrap();
    t.tick_at(MIN).unwrap();
    t.tick_at(40 * MIN).unwrap();
    assert_eq!(t.balance(), 90);
    assert_eq!(t.session_state(), SessionState::Idle);
}

#[test]
fn history_rows_match_outcomes() {
    let db = Database::open_memory().unwrap();
    let mut t = tracker_with_balance(&db, 0);

    t.start_at(30, 30, 0, date(6)).unwrap();
    t.stop_at(10 * MIN).unwrap();
    t.start_at(1, 30, 20 * MIN, date(7)).unwrap();
    t.tick_at(60 * MIN).unwrap();

    let stats = db.stats_all().unwrap();
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.clean_sessions, 1);
    assert_eq!(stats.overtime_sessions, 1);

    let log = db.points_history(10).unwrap();
    // Newest first: overtime penalty, then the clean finish.
    assert_eq!(log[0].reason, "overtime_expired");
    assert_eq!(log[1].reason, "clean_finish");
}

/// Commands a property-test run can issue, with coarse time steps.
#[derive(Debug, Clone)]
enum Cmd {
    Start(u64),
    Stop,
    AdvanceMin(u64),
}

fn cmd_strategy() -> impl Strategy<Value = Cmd> {
    prop_oneof![
        (1u64..180).prop_map(Cmd::Start),
        Just(Cmd::Stop),
        (0u64..120).prop_map(Cmd::AdvanceMin),
    ]
}

proptest! {
    /// For all command sequences, the balance never goes below zero and the
    /// tracker keeps accepting commands.
    #[test]
    fn balance_never_negative(cmds in proptest::collection::vec(cmd_strategy(), 1..40)) {
        let db = Database::open_memory().unwrap();
        let mut t = WellnessTracker::load(&db).unwrap();
        let mut now = 0u64;
        let mut day = 1u32;

        for cmd in cmds {
            match cmd {
                Cmd::Start(minutes) => {
                    // Rejected while a session is active; either way state
                    // must stay consistent.
                    let _ = t.start_at(minutes, 30, now, date(day % 28 + 1));
                }
                Cmd::Stop => {
                    t.stop_at(now).unwrap();
                }
                Cmd::AdvanceMin(m) => {
                    now += m * MIN;
                    day += m as u32 / (24 * 60);
                    t.tick_at(now).unwrap();
                }
            }
            // The u64 ledger can't go negative by construction; assert the
            // persisted copy stays in sync instead.
            let reloaded = WellnessTracker::load(&db).unwrap();
            prop_assert_eq!(reloaded.balance(), t.balance());
        }
    }
}
