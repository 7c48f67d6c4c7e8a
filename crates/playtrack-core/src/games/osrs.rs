//! Old School RuneScape stats -- hiscores by display name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Game, Metric, PlayerProfile, StatsProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrsSkill {
    pub name: String,
    pub level: u64,
    pub xp: u64,
    pub rank: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrsProfile {
    pub name: String,
    pub skills: Vec<OsrsSkill>,
}

impl OsrsProfile {
    pub fn from_json(data: &Value) -> Self {
        let skills = data["skills"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .map(|s| OsrsSkill {
                        name: s["name"].as_str().unwrap_or("").to_string(),
                        level: s["level"].as_u64().unwrap_or(0),
                        xp: s["xp"].as_u64().unwrap_or(0),
                        rank: s["rank"].as_u64().unwrap_or(0),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            name: data["name"].as_str().unwrap_or("").to_string(),
            skills,
        }
    }

    pub fn skill(&self, name: &str) -> Option<&OsrsSkill> {
        self.skills
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn total_level(&self) -> u64 {
        self.skill("Overall").map(|s| s.level).unwrap_or(0)
    }

    pub fn total_xp(&self) -> u64 {
        self.skill("Overall").map(|s| s.xp).unwrap_or(0)
    }
}

pub struct OsrsProvider;

impl StatsProvider for OsrsProvider {
    fn game(&self) -> Game {
        Game::Osrs
    }

    fn profile_path(&self, player_id: &str) -> String {
        format!("/osrs/hiscores/{}", urlencoding::encode(player_id))
    }

    fn parse_profile(&self, player_id: &str, data: &Value) -> PlayerProfile {
        let profile = OsrsProfile::from_json(data);
        let player = if profile.name.is_empty() {
            player_id.to_string()
        } else {
            profile.name.clone()
        };

        let mut metrics = vec![
            Metric::number("total_level", "Total level", profile.total_level() as f64),
            Metric::number("total_xp", "Total XP", profile.total_xp() as f64),
        ];
        for skill in &profile.skills {
            if skill.name.eq_ignore_ascii_case("Overall") || skill.name.is_empty() {
                continue;
            }
            metrics.push(Metric::number(
                &skill.name.to_lowercase(),
                &format!("{} level", skill.name),
                skill.level as f64,
            ));
        }

        PlayerProfile {
            game: Game::Osrs,
            player_id: player_id.to_string(),
            player,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "name": "Zezima",
            "skills": [
                {"name": "Overall", "level": 2277, "xp": 4_600_000_000u64, "rank": 1},
                {"name": "Attack", "level": 99, "xp": 200_000_000, "rank": 30},
                {"name": "Cooking", "level": 99, "xp": 13_034_431, "rank": 5000}
            ]
        })
    }

    #[test]
    fn totals_come_from_overall_row() {
        let p = OsrsProfile::from_json(&payload());
        assert_eq!(p.total_level(), 2277);
        assert_eq!(p.total_xp(), 4_600_000_000);
    }

    #[test]
    fn skill_lookup_is_case_insensitive() {
        let p = OsrsProfile::from_json(&payload());
        assert_eq!(p.skill("attack").unwrap().level, 99);
    }

    #[test]
    fn overall_row_excluded_from_per_skill_metrics() {
        let profile = OsrsProvider.parse_profile("Zezima", &payload());
        assert!(profile.metrics.iter().any(|m| m.key == "attack"));
        assert!(!profile.metrics.iter().any(|m| m.key == "overall"));
    }

    #[test]
    fn empty_payload_is_fine() {
        let p = OsrsProfile::from_json(&json!({}));
        assert_eq!(p.total_level(), 0);
        assert!(p.skills.is_empty());
    }
}
