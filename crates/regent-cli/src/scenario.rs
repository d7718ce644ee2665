//! Scenario files: an ASCII map plus the crossings the AI should make.

use std::path::Path;

use anyhow::{bail, Context, Result};
use regent_core::{TileId, UnitId};
use regent_grid::world::HOME;
use regent_grid::GridWorld;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    /// ASCII map, see `GridWorld::from_ascii`
    pub map: String,

    /// Land units to ferry, by id (units are numbered in reading order from 1)
    #[serde(default)]
    pub expeditions: Vec<Expedition>,

    /// Whether idle cities without a defender build one
    #[serde(default)]
    pub garrison: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expedition {
    pub unit: u32,
    /// Destination as `[x, y]`
    pub to: (i32, i32),
}

/// A checked expedition against a built world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub unit: UnitId,
    pub to: TileId,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    /// Build the world and resolve every expedition against it.
    pub fn build(&self) -> Result<(GridWorld, Vec<Target>)> {
        let world = GridWorld::from_ascii(&self.map)
            .with_context(|| format!("Bad map in scenario '{}'", self.name))?;

        let mut targets = Vec::with_capacity(self.expeditions.len());
        for exp in &self.expeditions {
            let unit = UnitId(exp.unit);
            if world.unit_owner(unit) != Some(HOME) {
                bail!("expedition {} is not a home unit", unit);
            }
            let (x, y) = exp.to;
            let Some(to) = world.tile(x, y) else {
                bail!("expedition destination ({x}, {y}) is off the map");
            };
            targets.push(Target { unit, to });
        }
        Ok((world, targets))
    }
}
