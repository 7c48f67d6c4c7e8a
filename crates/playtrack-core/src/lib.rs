//! # Playtrack Core Library
//!
//! This library provides the core business logic for Playtrack, a tracker
//! for gaming statistics and healthy play habits. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary; any GUI would be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Wellness Engine**: A wall-clock-based session state machine that
//!   requires the caller to periodically invoke `tick()` for progress, plus
//!   a points ledger with a hard zero floor and a calendar-day tracker
//! - **Storage**: SQLite-based history and state persistence and TOML-based
//!   configuration
//! - **Games**: Stats clients for the remote JSON backend, one per
//!   supported game (Dota 2, Overwatch, League of Legends, Valorant, OSRS)
//! - **Backend**: Email/password auth and a per-user datastore on the
//!   hosted backend, with the session token in the OS keyring
//!
//! ## Key Components
//!
//! - [`WellnessTracker`]: Session, points, and day-marker facade
//! - [`Database`] / [`Config`]: Local persistence
//! - [`StatsProvider`]: Trait implemented by every game's stats client
//! - [`AuthClient`] / [`UserStore`]: Hosted backend access

pub mod backend;
pub mod error;
pub mod events;
pub mod games;
pub mod storage;
pub mod wellness;

pub use backend::{AuthClient, BackendSession, UserStore};
pub use error::{ApiError, AuthError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use games::{ApiClient, Game, Metric, PlayerProfile, StatsProvider};
pub use storage::{Config, Database, WellnessStats};
pub use wellness::{
    PointsLedger, PointsReason, SessionState, SessionTimer, WellnessTracker,
};
