//! Concrete tasks built on `regent-tasks`.
//!
//! [`NavalTransport`] is the interesting one: it gets a land unit across water by
//! claiming (or commissioning) a transport, meeting it at the shore, and sailing to the
//! far side. [`MoveUnit`], [`Embark`] and [`ProduceUnit`] are its building blocks and are
//! usable on their own.

#![forbid(unsafe_code)]

pub mod crossing;
pub mod embark;
pub mod move_unit;
pub mod produce;
pub mod transport;

pub use crossing::{find_crossing, Crossing};
pub use embark::Embark;
pub use move_unit::MoveUnit;
pub use produce::ProduceUnit;
pub use transport::NavalTransport;
