//! Run configuration, loaded from `regent.yaml`.

use std::path::Path;

use anyhow::{Context, Result};
use regent_core::{Difficulty, Priorities};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "regent.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegentConfig {
    /// Game seed every per-turn random stream is derived from
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Sets the noise added to focus weights when `priorities` is absent
    pub difficulty: Difficulty,

    /// Fixed focus weights. Disables the expansion rebalance.
    pub priorities: Option<Priorities>,

    /// Turn limit for `simulate`
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,

    /// Print JSON instead of text
    pub json: bool,
}

fn default_seed() -> u64 {
    0x5eed
}
fn default_max_turns() -> u64 {
    50
}

impl Default for RegentConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            difficulty: Difficulty::default(),
            priorities: None,
            max_turns: default_max_turns(),
            json: false,
        }
    }
}

impl RegentConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Looks for `regent.yaml` in `dir`; defaults if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
