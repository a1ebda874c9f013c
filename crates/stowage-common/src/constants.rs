//! Yard-wide constants: canonical container lengths, stack bounds, and
//! crane timings.

use std::time::Duration;

/// Length of a short (half-footprint) container, in meters.
pub const SHORT_LENGTH: f64 = 2.59;

/// Length of a long (full-footprint) container, in meters.
pub const LONG_LENGTH: f64 = 6.06;

/// The only lengths a shipping container may have.
pub const CANONICAL_LENGTHS: [f64; 2] = [SHORT_LENGTH, LONG_LENGTH];

/// Maximum number of short containers sharing one layer.
pub const MAX_SHORTS_PER_LAYER: usize = 2;

/// Default bound on the number of real layers in a stack.
pub const DEFAULT_MAX_HEIGHT: usize = 10;

/// First identity handed out by a fresh id sequence.
pub const FIRST_CONTAINER_ID: u64 = 1;

/// Time every crane needs to couple its spreader to a container.
pub const COUPLING_TIME: Duration = Duration::from_millis(100);

/// Time every crane needs to release a container.
pub const DECOUPLING_TIME: Duration = Duration::from_millis(100);

/// Default hoisting time for a crane, in milliseconds.
pub const DEFAULT_LIFT_TIME_MS: u64 = 100;

/// Default lowering time for a crane, in milliseconds.
pub const DEFAULT_LOWER_TIME_MS: u64 = 100;
