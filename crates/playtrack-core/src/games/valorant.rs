//! Valorant stats -- competitive record by riot tag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Game, Metric, PlayerProfile, StatsProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValorantProfile {
    pub name: String,
    pub tier: String,
    pub kd_ratio: f64,
    pub win_rate: f64,
    pub headshot_pct: f64,
    pub matches_played: u64,
}

impl ValorantProfile {
    pub fn from_json(data: &Value) -> Self {
        Self {
            name: data["name"].as_str().unwrap_or("").to_string(),
            tier: data["current_tier_name"]
                .as_str()
                .unwrap_or("Unrated")
                .to_string(),
            kd_ratio: data["kd_ratio"].as_f64().unwrap_or(0.0),
            win_rate: data["win_rate"].as_f64().unwrap_or(0.0),
            headshot_pct: data["headshot_pct"].as_f64().unwrap_or(0.0),
            matches_played: data["matches_played"].as_u64().unwrap_or(0),
        }
    }
}

pub struct ValorantProvider;

impl StatsProvider for ValorantProvider {
    fn game(&self) -> Game {
        Game::Valorant
    }

    /// Riot tags contain `#`, which must not terminate the URL path.
    fn profile_path(&self, player_id: &str) -> String {
        format!("/valorant/players/{}", urlencoding::encode(player_id))
    }

    fn parse_profile(&self, player_id: &str, data: &Value) -> PlayerProfile {
        let profile = ValorantProfile::from_json(data);
        let player = if profile.name.is_empty() {
            player_id.to_string()
        } else {
            profile.name.clone()
        };
        PlayerProfile {
            game: Game::Valorant,
            player_id: player_id.to_string(),
            player,
            metrics: vec![
                Metric::text("tier", "Competitive tier", profile.tier.clone()),
                Metric::number("kd_ratio", "K/D ratio", profile.kd_ratio),
                Metric::number("win_rate", "Win rate %", profile.win_rate),
                Metric::number("headshot_pct", "Headshot %", profile.headshot_pct),
                Metric::number("matches_played", "Matches", profile.matches_played as f64),
            ],
        }
    }
}
