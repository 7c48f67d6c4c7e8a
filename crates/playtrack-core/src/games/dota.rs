//! Dota 2 stats -- profile and ranked record by Steam account id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Game, Metric, PlayerProfile, StatsProvider};

/// A Dota 2 player profile as reported by the stats backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotaProfile {
    pub persona_name: String,
    /// Backend rank tier encoding: tens digit = medal, ones digit = stars.
    pub rank_tier: u64,
    pub wins: u64,
    pub losses: u64,
}

impl DotaProfile {
    pub fn from_json(data: &Value) -> Self {
        Self {
            persona_name: data["profile"]["personaname"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            rank_tier: data["rank_tier"].as_u64().unwrap_or(0),
            wins: data["wins"].as_u64().unwrap_or(0),
            losses: data["losses"].as_u64().unwrap_or(0),
        }
    }

    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            return 0.0;
        }
        self.wins as f64 / total as f64 * 100.0
    }

    /// Human-readable medal for the rank tier encoding.
    pub fn medal(&self) -> String {
        let names = [
            "Uncalibrated",
            "Herald",
            "Guardian",
            "Crusader",
            "Archon",
            "Legend",
            "Ancient",
            "Divine",
            "Immortal",
        ];
        let medal = (self.rank_tier / 10) as usize;
        let stars = self.rank_tier % 10;
        match names.get(medal) {
            Some(name) if medal > 0 && stars > 0 => format!("{name} {stars}"),
            Some(name) => (*name).to_string(),
            None => "Unknown".to_string(),
        }
    }
}

pub struct DotaProvider;

impl StatsProvider for DotaProvider {
    fn game(&self) -> Game {
        Game::Dota2
    }

    fn profile_path(&self, player_id: &str) -> String {
        format!("/dota2/profile/{}", urlencoding::encode(player_id))
    }

    fn parse_profile(&self, player_id: &str, data: &Value) -> PlayerProfile {
        let profile = DotaProfile::from_json(data);
        let player = if profile.persona_name.is_empty() {
            player_id.to_string()
        } else {
            profile.persona_name.clone()
        };
        PlayerProfile {
            game: Game::Dota2,
            player_id: player_id.to_string(),
            player,
            metrics: vec![
                Metric::text("medal", "Rank medal", profile.medal()),
                Metric::number("wins", "Wins", profile.wins as f64),
                Metric::number("losses", "Losses", profile.losses as f64),
                Metric::number("win_rate", "Win rate %", profile.win_rate()),
            ],
        }
    }
}
