use std::io::Read;
use std::path::Path;

use crate::engine::{is_tile_value, Score, Tile};
use crate::leaderboard::TopScore;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("target {0} is not a power of two >= 2")]
    InvalidTarget(Tile),
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Seed for the tile spawner; absent means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tile value reported as the goal.
    #[serde(default = "defaults::target")]
    pub target: Tile,

    /// Best score known before the first game.
    #[serde(default)]
    pub leaderboard: LeaderboardSeed,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct LeaderboardSeed {
    #[serde(default = "defaults::player")]
    pub player: String,
    #[serde(default)]
    pub top_score: Score,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed: None, target: defaults::target(), leaderboard: LeaderboardSeed::default() }
    }
}

impl Default for LeaderboardSeed {
    fn default() -> Self {
        Self { player: defaults::player(), top_score: 0 }
    }
}

impl From<LeaderboardSeed> for TopScore {
    fn from(seed: LeaderboardSeed) -> Self {
        TopScore { player: seed.player, top_score: seed.top_score }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_tile_value(self.target) {
            return Err(ConfigError::InvalidTarget(self.target));
        }
        Ok(())
    }
}

mod defaults {
    use crate::engine::Tile;

    pub fn target() -> Tile { crate::session::DEFAULT_TARGET }
    pub fn player() -> String { String::from("---") }
}
