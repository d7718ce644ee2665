use crate::{rng, PlayerId, SplitMix64};

/// Identifies one player-turn. Everything random inside a turn derives from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub turn: u64,
    pub player: PlayerId,
    pub seed: u64,
}

/// Well-known RNG streams, kept apart so adding draws to one never shifts another.
pub mod streams {
    pub const ARBITRATION: u64 = 1;
    pub const TASKS: u64 = 2;
    pub const PLANNERS: u64 = 3;
}

impl TurnContext {
    pub fn rng(&self, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::derive_seed(
            self.seed,
            self.player.stable_id(),
            self.turn,
            stream,
        ))
    }
}
