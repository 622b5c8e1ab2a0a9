//! Cost-weighted two-dimensional bin packing.
//!
//! Assigns rectangular items to containers of fixed capacity and opening
//! cost, choosing a position and orientation for every item so that items
//! sharing a container never overlap, every item stays inside its
//! container, and the summed cost of the containers actually used is as low
//! as possible.
//!
//! - **Model**: immutable [`model::Instance`] shared by cheaply clonable
//!   [`model::Solution`] snapshots.
//! - **Placement**: rectangle geometry, anchor-point generation and the
//!   staged feasibility check.
//! - **Greedy**: first-fit (or lowest-corner) construction of an initial
//!   complete solution.
//! - **LNS**: cost-biased destroy, largest-first repair and
//!   accept-or-rollback rounds.
//! - **Hill climbing**: first-improvement single-item relocation.
//! - **Report**: solution output lines and CSV run summaries.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_binpack::greedy::{GreedyConfig, GreedyRunner};
//! use u_binpack::hill_climb::{HillClimbConfig, HillClimbRunner};
//! use u_binpack::lns::{LnsConfig, LnsRunner};
//! use u_binpack::model::Instance;
//!
//! let instance = Instance::parse("3 2  2 2  3 1  1 3  5 5 10  4 4 3").unwrap();
//! let initial = GreedyRunner::run(Arc::new(instance), &GreedyConfig::default()).unwrap();
//!
//! let lns = LnsRunner::run(
//!     &initial,
//!     &LnsConfig::default().with_rounds(5).with_iterations(20).with_seed(7),
//! )
//! .unwrap();
//! let polished = HillClimbRunner::run(&lns.best, &HillClimbConfig::default());
//!
//! assert!(polished.best_cost <= initial.total_cost());
//! polished.best.verify().unwrap();
//! ```

pub mod error;
pub mod greedy;
pub mod hill_climb;
pub mod lns;
pub mod model;
pub mod placement;
pub mod report;

pub use error::{PackError, Result};
