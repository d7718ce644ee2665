#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capability of a unit, used to index the registry's free pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitTrait {
    Settler,
    Worker,
    Military,
    Explorer,
    Supply,
    Land,
    Naval,
    Siege,
    Transport,
}

impl UnitTrait {
    pub const ALL: [UnitTrait; 9] = [
        UnitTrait::Settler,
        UnitTrait::Worker,
        UnitTrait::Military,
        UnitTrait::Explorer,
        UnitTrait::Supply,
        UnitTrait::Land,
        UnitTrait::Naval,
        UnitTrait::Siege,
        UnitTrait::Transport,
    ];
}

/// Purpose tag owning a unit in the [`AssignmentRegistry`](crate::AssignmentRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Assignment {
    Garrison,
    Exploration,
    Transport,
    Settling,
    Escort,
    Working,
    Defense,
    Reinforcement,
    Intercept,
    Army,
}

/// Movement domain of a mover.
///
/// `Amphibious` never describes a real unit; callers use it to ask the pathfinder for
/// hypothetical routes that may cross both land and water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Domain {
    Land,
    Water,
    Amphibious,
}

impl Domain {
    pub fn can_enter(self, water: bool) -> bool {
        match self {
            Domain::Land => !water,
            Domain::Water => water,
            Domain::Amphibious => true,
        }
    }
}
