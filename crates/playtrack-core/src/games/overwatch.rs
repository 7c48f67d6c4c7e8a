//! Overwatch stats -- competitive averages by battletag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Game, Metric, PlayerProfile, StatsProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverwatchProfile {
    pub name: String,
    pub endorsement: u64,
    pub games_won: u64,
    pub eliminations_avg: f64,
    pub deaths_avg: f64,
    pub damage_avg: f64,
    pub healing_avg: f64,
}

impl OverwatchProfile {
    pub fn from_json(data: &Value) -> Self {
        Self {
            name: data["name"].as_str().unwrap_or("").to_string(),
            endorsement: data["endorsement"].as_u64().unwrap_or(0),
            games_won: data["games_won"].as_u64().unwrap_or(0),
            eliminations_avg: data["eliminations_avg"].as_f64().unwrap_or(0.0),
            deaths_avg: data["deaths_avg"].as_f64().unwrap_or(0.0),
            damage_avg: data["damage_avg"].as_f64().unwrap_or(0.0),
            healing_avg: data["healing_avg"].as_f64().unwrap_or(0.0),
        }
    }
}

pub struct OverwatchProvider;

impl StatsProvider for OverwatchProvider {
    fn game(&self) -> Game {
        Game::Overwatch
    }

    /// Battletags contain `#`, which must not terminate the URL path.
    fn profile_path(&self, player_id: &str) -> String {
        format!("/overwatch/players/{}", urlencoding::encode(player_id))
    }

    fn parse_profile(&self, player_id: &str, data: &Value) -> PlayerProfile {
        let profile = OverwatchProfile::from_json(data);
        let player = if profile.name.is_empty() {
            player_id.to_string()
        } else {
            profile.name.clone()
        };
        PlayerProfile {
            game: Game::Overwatch,
            player_id: player_id.to_string(),
            player,
            metrics: vec![
                Metric::number("endorsement", "Endorsement level", profile.endorsement as f64),
                Metric::number("games_won", "Games won", profile.games_won as f64),
                Metric::number(
                    "eliminations_avg",
                    "Eliminations / game",
                    profile.eliminations_avg,
                ),
                Metric::number("deaths_avg", "Deaths / game", profile.deaths_avg),
                Metric::number("damage_avg", "Damage / game", profile.damage_avg),
                Metric::number("healing_avg", "Healing / game", profile.healing_avg),
            ],
        }
    }
}
