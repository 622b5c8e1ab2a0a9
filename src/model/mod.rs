//! Problem and solution data.
//!
//! [`Instance`] holds everything that never changes during a run: item
//! dimensions, container capacities and costs, and the fixed container
//! ordering by `(cost, ID)`. [`Solution`] holds only the mutable state
//! (placements, memberships, anchor frontiers) and shares the instance
//! through an `Arc`, so snapshots for rollback are cheap structural clones.
//!
//! Items and containers are addressed by their stable 1-based IDs.

mod instance;
mod solution;
mod types;

pub use instance::Instance;
pub use solution::Solution;
pub use types::{Container, Item, Placement, Point};
