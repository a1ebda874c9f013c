//! Unified error types for the Stowage workspace.
//!
//! Every variant is a validation failure surfaced immediately to the caller.
//! Nothing is retried internally, and an operation that fails leaves the
//! stack and the crane exactly as they were.

use thiserror::Error;

use crate::types::ContainerId;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StowageError {
    /// A length is not one of the two canonical container lengths.
    #[error("{length}m is not a valid size for a shipping container")]
    InvalidSize {
        /// The rejected length, in meters.
        length: f64,
    },

    /// A value of the wrong fundamental type was supplied.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Type the operation requires.
        expected: &'static str,
        /// Type that was actually supplied.
        found: &'static str,
    },

    /// A symbolic size name is neither `long` nor `short`.
    #[error("{expression:?} is not a valid expression to generate a container, choose from [\"long\", \"short\"]")]
    InvalidSizeExpression {
        /// The rejected size name.
        expression: String,
    },

    /// An added layer cannot share a footprint with the current top layer,
    /// or is itself not a legal layer.
    #[error("size conflict: {reason}")]
    SizeConflict {
        /// Why the layer was rejected.
        reason: String,
    },

    /// The stack cannot take another container.
    #[error("container stack can't add any more containers as it is already at max height {max_height}")]
    StackTooTall {
        /// Configured bound on real layers.
        max_height: usize,
    },

    /// A removal was attempted on an empty stack.
    #[error("container cannot be removed as container stack is empty")]
    StackEmpty,

    /// A pair removal was requested but the top layer holds a single short
    /// container.
    #[error("cannot remove a pair: top layer holds only one short container")]
    LayerHalfFull,

    /// A pair removal was requested but the top layer holds a long
    /// container.
    #[error("cannot remove a pair: top layer holds a long container")]
    PairExpected,

    /// `add` received something other than a layer.
    #[error("expected a layer of containers, got {found}")]
    LayerExpected {
        /// Description of what was supplied instead.
        found: &'static str,
    },

    /// A stack was configured with room for no layers at all.
    #[error("stack max height must be at least 1")]
    InvalidMaxHeight,

    /// A crane was asked to pick up while already holding a container.
    #[error("crane is already coupled to container {held}")]
    CraneOccupied {
        /// The container the crane is holding.
        held: ContainerId,
    },

    /// A crane was asked to put down while holding nothing.
    #[error("crane is not coupled to any container")]
    CraneEmpty,

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Deserializing a configuration document failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StowageError>;
