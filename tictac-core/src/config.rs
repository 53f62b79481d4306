//! Engine settings, loadable from JSON

use crate::ai::ComputerPlayer;
use crate::difficulty::Difficulty;
use crate::game::Mark;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a human-vs-computer game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Computer strength
    pub difficulty: Difficulty,
    /// Mark played by the human; the computer takes the other one
    pub human: Mark,
    /// Seed for the computer's random choices (None = entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            human: Mark::X,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn computer_mark(&self) -> Mark {
        self.human.opponent()
    }

    /// Build the computer opponent described by this config
    pub fn computer(&self) -> ComputerPlayer {
        match self.seed {
            Some(seed) => ComputerPlayer::with_seed(self.computer_mark(), self.difficulty, seed),
            None => ComputerPlayer::new(self.computer_mark(), self.difficulty),
        }
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
