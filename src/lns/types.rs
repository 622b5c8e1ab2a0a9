//! Core traits for LNS.

use crate::error::Result;
use crate::model::Solution;
use rand::Rng;

/// A destroy operator unassigns part of a solution in place.
///
/// After `destroy` returns, the solution must be structurally consistent:
/// memberships, used flags and anchor frontiers reflect only the items
/// that are still placed.
pub trait DestroyOperator: Send + Sync {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Removes items from `solution`.
    ///
    /// # Arguments
    /// * `solution` - The solution to partially destroy
    /// * `rate` - Nominal fraction of placed items to remove, in (0, 1]
    /// * `rng` - Random number generator
    ///
    /// Returns the IDs of the removed items.
    fn destroy<R: Rng>(&self, solution: &mut Solution, rate: f64, rng: &mut R) -> Vec<usize>;
}

/// A repair operator places previously removed items back.
pub trait RepairOperator: Send + Sync {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Places every item in `removed` into `solution`.
    ///
    /// On error the solution may be partially repaired; callers roll back.
    fn repair<R: Rng>(&self, solution: &mut Solution, removed: &[usize], rng: &mut R)
        -> Result<()>;
}
