//! The mechanical capabilities a piece of lifting equipment offers.

use std::future::Future;

/// Timed mechanical steps of lifting equipment.
///
/// Each step completes after its configured duration and suspends only the
/// calling task.
pub trait Hoist {
    /// Attaches the spreader to a container.
    fn couple(&self) -> impl Future<Output = ()> + Send;

    /// Releases the container from the spreader.
    fn decouple(&self) -> impl Future<Output = ()> + Send;

    /// Hoists the spreader clear of the stack.
    fn lift(&self) -> impl Future<Output = ()> + Send;

    /// Lowers the spreader onto the stack.
    fn lower(&self) -> impl Future<Output = ()> + Send;
}
