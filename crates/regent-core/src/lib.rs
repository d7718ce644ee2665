//! Shared primitives for the Regent strategy AI.
//!
//! Everything here is engine-agnostic: the game itself is reached only through the
//! [`WorldView`] / [`WorldMut`] traits, and all randomness flows through [`SplitMix64`] so a
//! turn can be replayed from its seed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod ids;
pub mod order;
pub mod priorities;
pub mod registry;
pub mod rng;
pub mod traits;
pub mod turn;
pub mod world;

pub use ids::{AreaId, CityId, PlayerId, TileId, UnitDefId, UnitId};
pub use order::{Effect, Focus, Order, OrderGroup};
pub use priorities::{Difficulty, Priorities};
pub use registry::AssignmentRegistry;
pub use rng::{DeterministicRng, SplitMix64};
pub use traits::{Assignment, Domain, UnitTrait};
pub use turn::TurnContext;
pub use world::{MoveOutcome, Mover, UnitDef, WorldMut, WorldView};
