//! Geometry, anchor points and the staged feasibility check.
//!
//! A placement attempt never mutates the solution: [`Solution::can_place`]
//! returns a staged [`Placement`] which the caller either commits with
//! [`Solution::insert`] or simply drops.
//!
//! [`Solution::can_place`]: crate::model::Solution::can_place
//! [`Solution::insert`]: crate::model::Solution::insert
//! [`Placement`]: crate::model::Placement

mod anchors;
mod geometry;
mod placer;

pub use anchors::AnchorStrategy;
pub use geometry::{intersects, Rect};
pub use placer::ContainerPass;
