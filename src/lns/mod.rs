//! Large Neighborhood Search (LNS) with cost-biased destroy.
//!
//! Each trial removes a weighted random subset of items, where items in
//! expensive containers are more likely to be picked, and greedily
//! reinserts them largest first, preferring containers that are already
//! open. A trial is kept only if it strictly lowers the total cost;
//! otherwise, or when repair cannot place an item, it is rolled back to the
//! round baseline.
//!
//! # References
//!
//! Shaw (1998), "Using Constraint Programming and Local Search Methods to
//! Solve Vehicle Routing Problems"

mod config;
mod operators;
mod runner;
mod types;

pub use config::{Acceptance, LnsConfig};
pub use operators::{CostBiasedDestroy, LargestFirstRepair, UniformDestroy};
pub use runner::{LnsResult, LnsRunner};
pub use types::{DestroyOperator, RepairOperator};
