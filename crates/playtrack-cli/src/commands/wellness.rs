use clap::Subcommand;
use playtrack_core::storage::{Config, Database};
use playtrack_core::wellness::WellnessTracker;

#[derive(Subcommand)]
pub enum WellnessAction {
    /// Start a gaming session countdown
    Start {
        /// Planned duration in minutes (defaults to wellness.session_min)
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// Stop the active session
    Stop,
    /// Tick the timer and print the current state as JSON
    Status,
    /// Show the points balance and recent adjustments
    Points {
        /// Number of log entries to show
        #[arg(long, default_value = "10")]
        history: u32,
    },
    /// Recent finished sessions
    Sessions {
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Session statistics, today and all-time
    Summary,
}

pub fn run(action: WellnessAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tracker = WellnessTracker::load(&db)?;

    match action {
        WellnessAction::Start { minutes } => {
            let config = Config::load()?;
            let planned = minutes.unwrap_or(config.wellness.session_min);
            let events = tracker.start(planned, config.wellness.overtime_min)?;
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        WellnessAction::Stop => {
            let events = tracker.stop()?;
            if events.is_empty() {
                println!("no active session");
            }
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        WellnessAction::Status => {
            // Tick first so the snapshot reflects wall-clock progress and
            // any deadline crossing settles its points.
            let events = tracker.tick()?;
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
        }
        WellnessAction::Points { history } => {
            let log = db.points_history(history)?;
            println!("balance: {}", tracker.balance());
            for entry in log {
                println!(
                    "{:>+5}  {:<18} -> {:>5}  {}",
                    entry.delta,
                    entry.reason,
                    entry.balance_after,
                    entry.at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        WellnessAction::Sessions { limit } => {
            let sessions = db.recent_sessions(limit)?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        WellnessAction::Summary => {
            let today = db.stats_today()?;
            let all = db.stats_all()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "today": today,
                    "all_time": all,
                    "balance": tracker.balance(),
                }))?
            );
        }
    }
    Ok(())
}
