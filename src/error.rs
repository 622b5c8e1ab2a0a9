//! Error types.

use thiserror::Error;

/// Errors produced by the packing engine and its loaders.
#[derive(Debug, Error)]
pub enum PackError {
    /// No container, anchor point or orientation admits the item.
    ///
    /// Fatal during construction. During an LNS repair it only aborts the
    /// current trial, which is then rolled back.
    #[error("item {item} cannot be placed in any container")]
    PlacementInfeasible {
        /// ID of the item that could not be placed.
        item: usize,
    },

    /// A runner configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The instance text or dimensions are malformed.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A solution violates a structural invariant.
    #[error("invalid solution: {0}")]
    InvalidSolution(String),

    /// Reading an instance or writing a report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PackError>;
