use crate::Focus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-player strategic emphasis used to weight orders during arbitration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Priorities {
    pub expansion: f64,
    pub economy: f64,
    pub military: f64,
    /// Magnitude of the uniform noise added to every focus weight. Zero makes weighting
    /// deterministic (the roulette draw itself stays random).
    pub randomize: f64,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            expansion: 1.0,
            economy: 1.0,
            military: 1.0,
            randomize: 0.2,
        }
    }
}

impl Priorities {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            randomize: difficulty.randomize(),
            ..Self::default()
        }
    }

    /// Orders without a focus are weighted 1.0.
    pub fn weight(&self, focus: Option<Focus>) -> f64 {
        match focus {
            Some(Focus::Expansion) => self.expansion,
            Some(Focus::Economy) => self.economy,
            Some(Focus::Military) => self.military,
            None => 1.0,
        }
    }

    /// Fewer cities means a stronger pull towards expansion, clamped to `[0.5, 1.5]`.
    pub fn rebalance_expansion(&mut self, city_count: usize) {
        self.expansion = if city_count == 0 {
            1.5
        } else {
            (5.0 / city_count as f64).clamp(0.5, 1.5)
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Deity,
}

impl Difficulty {
    pub fn randomize(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Normal => 0.2,
            Difficulty::Hard => 0.15,
            Difficulty::Deity => 0.1,
        }
    }
}
