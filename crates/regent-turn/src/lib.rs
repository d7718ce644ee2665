//! Per-turn driver for one AI player.
//!
//! Each turn the [`Orchestrator`] advances every root task tree once, asks its
//! [`Planner`]s for fresh proposals, then settles competing orders with a weighted
//! roulette per `(group, entity)` bucket (see [`arbitrate`]).

#![forbid(unsafe_code)]

pub mod arbitration;
pub mod orchestrator;
pub mod planner;

pub use arbitration::{arbitrate, weighted_priority};
pub use orchestrator::{Orchestrator, TurnReport};
pub use planner::{PlanContext, Planner, Proposal};
