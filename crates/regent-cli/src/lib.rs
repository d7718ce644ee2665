//! Library side of the `regent` binary: configuration, scenario files, demo planners and
//! the simulation loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod planners;
pub mod scenario;
pub mod simulate;

pub use config::RegentConfig;
pub use scenario::{Expedition, Scenario, Target};
pub use simulate::{run, Arrival, Summary};
