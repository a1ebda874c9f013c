//! # stowage-crane
//!
//! Cranes move one container at a time between the top of a stack and
//! their own spreader.
//!
//! Every mechanical step (coupling, decoupling, lifting, lowering) is a
//! suspension point on the tokio timer, so many cranes can work different
//! stacks concurrently without stalling one another. The steps of a single
//! transfer always run strictly in sequence, and the transfer only changes
//! who holds the container once every step has finished.
//!
//! Stacks carry no internal locking. Callers driving several cranes against
//! the same stack must serialize access themselves, for example behind a
//! `tokio::sync::Mutex`.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod crane;
pub mod hoist;
pub mod kind;
pub mod report;
