//! Profile comparison -- the "compare with a friend or pro" feature.
//!
//! Pure transform over two parsed profiles of the same game: shared numeric
//! metrics are diffed, text-only metrics (rank names) are shown side by side.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

use super::{Game, PlayerProfile};

/// One metric, diffed across the two players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDelta {
    pub key: String,
    pub label: String,
    pub left: f64,
    pub right: f64,
    /// left - right; positive means the left player leads.
    pub delta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileComparison {
    pub game: Game,
    pub left: String,
    pub right: String,
    pub metrics: Vec<MetricDelta>,
}

/// Diff two same-game profiles, keeping the left profile's metric order.
/// Metrics the right profile doesn't report are skipped.
pub fn compare_profiles(
    left: &PlayerProfile,
    right: &PlayerProfile,
) -> Result<ProfileComparison> {
    if left.game != right.game {
        return Err(ValidationError::InvalidValue {
            field: "game".into(),
            message: format!(
                "cannot compare {} against {}",
                left.game.display_name(),
                right.game.display_name()
            ),
        }
        .into());
    }

    let metrics = left
        .metrics
        .iter()
        .filter_map(|lm| {
            let rm = right.metrics.iter().find(|rm| rm.key == lm.key)?;
            Some(MetricDelta {
                key: lm.key.clone(),
                label: lm.label.clone(),
                left: lm.value,
                right: rm.value,
                delta: lm.value - rm.value,
                left_text: lm.text.clone(),
                right_text: rm.text.clone(),
            })
        })
        .collect();

    Ok(ProfileComparison {
        game: left.game,
        left: left.player.clone(),
        right: right.player.clone(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Metric;

    fn profile(game: Game, player: &str, wins: f64) -> PlayerProfile {
        PlayerProfile {
            game,
            player_id: player.to_string(),
            player: player.to_string(),
            metrics: vec![
                Metric::number("wins", "Wins", wins),
                Metric::text("medal", "Medal", "Legend 3"),
            ],
        }
    }

    #[test]
    fn diffs_shared_numeric_metrics() {
        let a = profile(Game::Dota2, "alice", 500.0);
        let b = profile(Game::Dota2, "bob", 450.0);
        let cmp = compare_profiles(&a, &b).unwrap();
        assert_eq!(cmp.metrics[0].delta, 50.0);
        assert_eq!(cmp.left, "alice");
    }

    #[test]
    fn cross_game_comparison_is_rejected() {
        let a = profile(Game::Dota2, "alice", 1.0);
        let b = profile(Game::Osrs, "bob", 1.0);
        assert!(compare_profiles(&a, &b).is_err());
    }

    #[test]
    fn unshared_metrics_are_skipped() {
        let a = profile(Game::Valorant, "a", 1.0);
        let mut b = profile(Game::Valorant, "b", 2.0);
        b.metrics.retain(|m| m.key != "wins");
        let cmp = compare_profiles(&a, &b).unwrap();
        assert_eq!(cmp.metrics.len(), 1);
        assert_eq!(cmp.metrics[0].key, "medal");
    }
}
