//! League of Legends stats -- ranked standing by summoner name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Game, Metric, PlayerProfile, StatsProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueProfile {
    pub summoner: String,
    pub level: u64,
    pub tier: String,
    pub rank: String,
    pub league_points: u64,
    pub wins: u64,
    pub losses: u64,
}

impl LeagueProfile {
    pub fn from_json(data: &Value) -> Self {
        Self {
            summoner: data["summoner"].as_str().unwrap_or("").to_string(),
            level: data["level"].as_u64().unwrap_or(0),
            tier: data["tier"].as_str().unwrap_or("UNRANKED").to_string(),
            rank: data["rank"].as_str().unwrap_or("").to_string(),
            league_points: data["league_points"].as_u64().unwrap_or(0),
            wins: data["wins"].as_u64().unwrap_or(0),
            losses: data["losses"].as_u64().unwrap_or(0),
        }
    }

    pub fn standing(&self) -> String {
        if self.rank.is_empty() {
            self.tier.clone()
        } else {
            format!("{} {}", self.tier, self.rank)
        }
    }
}

pub struct LeagueProvider;

impl StatsProvider for LeagueProvider {
    fn game(&self) -> Game {
        Game::League
    }

    fn profile_path(&self, player_id: &str) -> String {
        format!("/league/players/{}", urlencoding::encode(player_id))
    }

    fn parse_profile(&self, player_id: &str, data: &Value) -> PlayerProfile {
        let profile = LeagueProfile::from_json(data);
        let player = if profile.summoner.is_empty() {
            player_id.to_string()
        } else {
            profile.summoner.clone()
        };
        PlayerProfile {
            game: Game::League,
            player_id: player_id.to_string(),
            player,
            metrics: vec![
                Metric::text("standing", "Ranked standing", profile.standing()),
                Metric::number("level", "Summoner level", profile.level as f64),
                Metric::number("league_points", "League points", profile.league_points as f64),
                Metric::number("wins", "Wins", profile.wins as f64),
                Metric::number("losses", "Losses", profile.losses as f64),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standing_joins_tier_and_rank() {
        let p = LeagueProfile::from_json(&json!({"tier": "GOLD", "rank": "II"}));
        assert_eq!(p.standing(), "GOLD II");
    }

    #[test]
    fn unranked_when_missing() {
        let p = LeagueProfile::from_json(&json!({}));
        assert_eq!(p.standing(), "UNRANKED");
        assert_eq!(p.league_points, 0);
    }
}
