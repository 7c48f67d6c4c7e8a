//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Saved per-game player identifiers
//! - Remote stats backend and BaaS base URLs
//! - Wellness session durations
//!
//! Configuration is stored at `~/.config/playtrack/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::games::Game;

/// Wellness timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessConfig {
    /// Default planned session length, minutes.
    #[serde(default = "default_session_min")]
    pub session_min: u64,
    /// Overtime grace window after the planned end, minutes.
    #[serde(default = "default_overtime_min")]
    pub overtime_min: u64,
}

/// Remote stats backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_stats_base_url")]
    pub base_url: String,
}

/// Backend-as-a-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
}

/// Saved player identifiers, one per game.
///
/// These are what the original per-screen settings blobs stored: the Steam
/// account id, battletag, summoner name, riot tag, and OSRS display name
/// the user last looked up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayersConfig {
    #[serde(default)]
    pub dota2: Option<String>,
    #[serde(default)]
    pub overwatch: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub valorant: Option<String>,
    #[serde(default)]
    pub osrs: Option<String>,
}

impl PlayersConfig {
    pub fn get(&self, game: Game) -> Option<&str> {
        match game {
            Game::Dota2 => self.dota2.as_deref(),
            Game::Overwatch => self.overwatch.as_deref(),
            Game::League => self.league.as_deref(),
            Game::Valorant => self.valorant.as_deref(),
            Game::Osrs => self.osrs.as_deref(),
        }
    }

    pub fn set(&mut self, game: Game, id: Option<String>) {
        let slot = match game {
            Game::Dota2 => &mut self.dota2,
            Game::Overwatch => &mut self.overwatch,
            Game::League => &mut self.league,
            Game::Valorant => &mut self.valorant,
            Game::Osrs => &mut self.osrs,
        };
        *slot = id;
    }

    /// (game, saved id) pairs for every game with a saved player.
    pub fn entries(&self) -> Vec<(Game, String)> {
        Game::ALL
            .iter()
            .filter_map(|&g| self.get(g).map(|id| (g, id.to_string())))
            .collect()
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/playtrack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wellness: WellnessConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub players: PlayersConfig,
}

// Default functions
fn default_session_min() -> u64 {
    60
}
fn default_overtime_min() -> u64 {
    30
}
fn default_stats_base_url() -> String {
    "https://stats.playtrack.app".into()
}
fn default_backend_base_url() -> String {
    "https://backend.playtrack.app".into()
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            session_min: default_session_min(),
            overtime_min: default_overtime_min(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            base_url: default_stats_base_url(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wellness: WellnessConfig::default(),
            stats: StatsConfig::default(),
            backend: BackendConfig::default(),
            players: PlayersConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value cannot be
    /// parsed as the existing value's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.wellness.session_min, 60);
        assert_eq!(cfg.wellness.overtime_min, 30);
        assert!(cfg.players.entries().is_empty());
    }

    #[test]
    fn dotted_get_set() {
        let mut cfg = Config::default();
        cfg.set("wellness.session_min", "45").unwrap();
        assert_eq!(cfg.get("wellness.session_min").unwrap(), "45");
        assert!(cfg.set("wellness.nope", "1").is_err());
    }

    #[test]
    fn players_roundtrip() {
        let mut cfg = Config::default();
        cfg.players.set(Game::Overwatch, Some("Player#1234".into()));
        assert_eq!(cfg.players.get(Game::Overwatch), Some("Player#1234"));
        assert_eq!(cfg.players.entries().len(), 1);

        let toml = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back.players.get(Game::Overwatch), Some("Player#1234"));
    }

    #[test]
    fn empty_toml_parses_with_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.stats.base_url, default_stats_base_url());
    }
}
