//! Greedy construction of an initial solution.
//!
//! Items are placed one at a time in input order. Containers are scanned
//! in the fixed `(cost, ID)` order, anchors in ascending `(y, x)` order,
//! unrotated before rotated. The default [`ConstructionRule::FirstFit`]
//! commits the first feasible candidate; [`ConstructionRule::LowestCorner`]
//! prefers already-open containers and the lowest `(cost, x + y)` candidate.
//!
//! An item that no container admits makes the whole instance infeasible
//! and construction fails with
//! [`PackError::PlacementInfeasible`](crate::PackError::PlacementInfeasible).

mod config;
mod runner;

pub use config::{ConstructionRule, GreedyConfig};
pub use runner::{construct, GreedyRunner};
