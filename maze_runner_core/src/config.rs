//! Tunable game rules.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! [limits]
//! health = 100
//!
//! [decay]
//! starvation_penalty = 10
//!
//! [effects]
//! potion = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{item::ItemKind, player::Stats};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Upper bounds of the player's stats. The lower bound is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLimits {
    pub health: u32,
    pub hunger: u32,
    pub thirst: u32,
}

impl Default for StatLimits {
    fn default() -> Self {
        StatLimits {
            health: 100,
            hunger: 50,
            thirst: 50,
        }
    }
}

/// What every successful move costs the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayRules {
    pub hunger: u32,
    pub thirst: u32,
    /// Health lost on a move that leaves hunger or thirst empty.
    pub starvation_penalty: u32,
    /// Health lost when stepping onto lava.
    pub lava_damage: u32,
}

impl Default for DecayRules {
    fn default() -> Self {
        DecayRules {
            hunger: 1,
            thirst: 1,
            starvation_penalty: 5,
            lava_damage: 5,
        }
    }
}

/// How much each consumable restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemEffects {
    pub potion: u32,
    pub honey: u32,
    pub apple: u32,
    pub water: u32,
}

impl Default for ItemEffects {
    fn default() -> Self {
        ItemEffects {
            potion: 20,
            honey: 10,
            apple: 5,
            water: 10,
        }
    }
}

impl ItemEffects {
    /// Returns the `(health, hunger, thirst)` delta applying `kind` produces.
    pub fn delta_for(&self, kind: ItemKind) -> (i64, i64, i64) {
        match kind {
            ItemKind::Coin => (0, 0, 0),
            ItemKind::Potion => (i64::from(self.potion), 0, 0),
            ItemKind::Honey => (0, i64::from(self.honey), 0),
            ItemKind::Apple => (0, i64::from(self.apple), 0),
            ItemKind::Water => (0, 0, i64::from(self.water)),
        }
    }
}

/// Stats the player starts with. A missing field starts at its limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartStats {
    pub health: Option<u32>,
    pub hunger: Option<u32>,
    pub thirst: Option<u32>,
}

impl From<Stats> for StartStats {
    fn from(stats: Stats) -> Self {
        StartStats {
            health: Some(stats.health),
            hunger: Some(stats.hunger),
            thirst: Some(stats.thirst),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub limits: StatLimits,
    pub start: StartStats,
    pub decay: DecayRules,
    pub effects: ItemEffects,
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn starting_stats(&self) -> Stats {
        Stats::new(
            self.start.health.unwrap_or(self.limits.health),
            self.start.hunger.unwrap_or(self.limits.hunger),
            self.start.thirst.unwrap_or(self.limits.thirst),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let StatLimits {
            health,
            hunger,
            thirst,
        } = self.limits;
        if health == 0 || hunger == 0 || thirst == 0 {
            return Err(ConfigError::Invalid(
                "stat limits must be greater than zero".to_string(),
            ));
        }
        let start = self.starting_stats();
        if start.health == 0 {
            return Err(ConfigError::Invalid(
                "starting health must be greater than zero".to_string(),
            ));
        }
        if start.health > health || start.hunger > hunger || start.thirst > thirst {
            return Err(ConfigError::Invalid(format!(
                "starting stats {start:?} exceed limits {:?}",
                self.limits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.starting_stats(), Stats::new(100, 50, 50));
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [limits]
            health = 10

            [decay]
            starvation_penalty = 2

            [start]
            health = 5
            hunger = 3
            thirst = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.health, 10);
        assert_eq!(config.limits.hunger, 50);
        assert_eq!(config.decay.starvation_penalty, 2);
        assert_eq!(config.decay.hunger, 1);
        assert_eq!(config.starting_stats(), Stats::new(5, 3, 4));
    }

    #[test]
    fn missing_start_fields_begin_at_their_limits() {
        let config = GameConfig::from_toml_str("[start]\nhealth = 5\n").unwrap();
        assert_eq!(config.start.hunger, None);
        assert_eq!(config.starting_stats(), Stats::new(5, 50, 50));

        let config = GameConfig::from_toml_str(
            r#"
            [limits]
            thirst = 20
            [start]
            hunger = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.starting_stats(), Stats::new(100, 7, 20));
    }

    #[test]
    fn zero_starting_health_is_rejected() {
        let err = GameConfig::from_toml_str("[start]\nhealth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn starting_stats_above_limits_are_rejected() {
        let err = GameConfig::from_toml_str(
            r#"
            [limits]
            health = 10
            [start]
            health = 11
            hunger = 1
            thirst = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = GameConfig::from_toml_str("[limits]\nthirst = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[limits\nhealth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
