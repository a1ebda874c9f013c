//! # stowage-core
//!
//! The stacking engine of a container yard.
//!
//! This crate provides:
//! - **Container**: an immutable cargo unit with a validated size, opaque
//!   contents, and an identity drawn from the process-wide
//!   [`IdSequence`](container::IdSequence).
//! - **Factory**: construction of containers by symbolic size name.
//! - **Layer**: one tier of a stack, either a single long container or one
//!   to two short containers side by side.
//! - **Stack**: the layering and removal rules, enforced all-or-nothing.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod container;
pub mod factory;
pub mod layer;
pub mod stack;
