//! Relocation hill climbing.
//!
//! Moves a single item from its container into another container whenever
//! the move strictly lowers the total cost, restarting the scan from the
//! first item after each accepted move. Stops at a local optimum of the
//! single-item relocation neighborhood.

mod config;
mod runner;

pub use config::HillClimbConfig;
pub use runner::{HillClimbResult, HillClimbRunner};
