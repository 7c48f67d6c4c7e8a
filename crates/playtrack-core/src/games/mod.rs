//! Per-game stats clients for the remote JSON backend.
//!
//! Each supported game implements [`StatsProvider`]: it knows its route on
//! the stats backend and how to turn the backend's loosely-shaped JSON into
//! a [`PlayerProfile`]. Missing optional fields become zero/empty values,
//! never errors -- the backend is an opaque service we don't control.

pub mod client;
pub mod compare;
mod dota;
mod league;
mod osrs;
mod overwatch;
mod valorant;

pub use client::ApiClient;
pub use compare::{compare_profiles, MetricDelta, ProfileComparison};
pub use dota::{DotaProfile, DotaProvider};
pub use league::{LeagueProfile, LeagueProvider};
pub use osrs::{OsrsProfile, OsrsProvider, OsrsSkill};
pub use overwatch::{OverwatchProfile, OverwatchProvider};
pub use valorant::{ValorantProfile, ValorantProvider};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, ValidationError};

/// A supported game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Dota2,
    Overwatch,
    League,
    Valorant,
    Osrs,
}

impl Game {
    pub const ALL: [Game; 5] = [
        Game::Dota2,
        Game::Overwatch,
        Game::League,
        Game::Valorant,
        Game::Osrs,
    ];

    /// Stable identifier used in routes, config keys, and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Dota2 => "dota2",
            Game::Overwatch => "overwatch",
            Game::League => "league",
            Game::Valorant => "valorant",
            Game::Osrs => "osrs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Game::Dota2 => "Dota 2",
            Game::Overwatch => "Overwatch",
            Game::League => "League of Legends",
            Game::Valorant => "Valorant",
            Game::Osrs => "Old School RuneScape",
        }
    }

    /// What this game calls its player identifier.
    pub fn id_label(&self) -> &'static str {
        match self {
            Game::Dota2 => "steam account id",
            Game::Overwatch => "battletag",
            Game::League => "summoner name",
            Game::Valorant => "riot tag",
            Game::Osrs => "display name",
        }
    }

    /// The stats provider for this game.
    pub fn provider(&self) -> Box<dyn StatsProvider> {
        match self {
            Game::Dota2 => Box::new(DotaProvider),
            Game::Overwatch => Box::new(OverwatchProvider),
            Game::League => Box::new(LeagueProvider),
            Game::Valorant => Box::new(ValorantProvider),
            Game::Osrs => Box::new(OsrsProvider),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dota2" | "dota" => Ok(Game::Dota2),
            "overwatch" | "ow" => Ok(Game::Overwatch),
            "league" | "lol" => Ok(Game::League),
            "valorant" | "val" => Ok(Game::Valorant),
            "osrs" | "runescape" => Ok(Game::Osrs),
            other => Err(ValidationError::UnknownGame(other.to_string())),
        }
    }
}

/// One displayed stat. `value` carries the numeric form used for
/// comparisons; `text` overrides display for non-numeric stats (rank names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Metric {
    pub fn number(key: &str, label: &str, value: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
            text: None,
        }
    }

    pub fn text(key: &str, label: &str, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: 0.0,
            text: Some(text.into()),
        }
    }
}

/// A parsed player profile, uniform across games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub game: Game,
    /// The identifier the profile was fetched with.
    pub player_id: String,
    /// Display name reported by the backend (falls back to `player_id`).
    pub player: String,
    pub metrics: Vec<Metric>,
}

/// Every game's stats client implements this trait.
pub trait StatsProvider: Send + Sync {
    /// The game this provider serves.
    fn game(&self) -> Game;

    /// Backend route for a player's profile, with the identifier encoded.
    fn profile_path(&self, player_id: &str) -> String;

    /// Turn the unwrapped backend payload into a profile. Lenient: missing
    /// fields default, extra fields are ignored.
    fn parse_profile(&self, player_id: &str, data: &serde_json::Value) -> PlayerProfile;

    /// Fetch and parse a player's profile.
    fn fetch_profile(
        &self,
        client: &ApiClient,
        player_id: &str,
    ) -> Result<PlayerProfile, ApiError> {
        let data = client.get_json(&self.profile_path(player_id))?;
        Ok(self.parse_profile(player_id, &data))
    }
}
