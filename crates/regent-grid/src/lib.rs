//! A small square-grid world implementing [`regent_core::WorldView`] and
//! [`regent_core::WorldMut`].
//!
//! Land, coastal water and impassable deep water; cities with a one-slot build queue; land
//! units that ride naval transports across water. Maps are usually written as ASCII:
//!
//! ```text
//! .C..~~~..
//! .W..~G~..
//! ```
//!
//! See [`GridWorld::from_ascii`] for the symbol table.

#![forbid(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod map;
mod path;
pub mod world;

pub use catalogue::{Catalogue, UnitSpec};
pub use error::MapError;
pub use map::{GridMap, Terrain};
pub use world::GridWorld;
