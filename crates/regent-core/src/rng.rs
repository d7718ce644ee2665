//! Deterministic RNG helpers.
//!
//! Small and dependency-free so a turn can be replayed bit-for-bit from its seed. Not
//! cryptographic.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)` with 53 bits of precision.
    fn next_f64_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Weyl increment of SplitMix64 (the golden ratio in 64-bit fixed point).
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Sequential generator used for per-turn streams.
///
/// One `u64` of state advanced by [`GOLDEN_GAMMA`], each output scrambled by [`mix64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

/// SplitMix64 output finalizer: a bijective avalanche on `u64`.
pub fn mix64(x: u64) -> u64 {
    let x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Independent stream for `(player, turn, stream)` under one game seed.
pub fn derive_seed(game_seed: u64, player: u64, turn: u64, stream: u64) -> u64 {
    let salted = [
        mix64(player.wrapping_add(GOLDEN_GAMMA)),
        mix64(turn.rotate_left(17)),
        mix64(stream),
    ];
    mix64(salted.iter().fold(game_seed, |acc, s| acc ^ s))
}
