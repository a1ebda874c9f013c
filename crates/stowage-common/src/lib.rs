//! # stowage-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the entire Stowage workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the value types (container sizes and
//! identities) that the stack engine and the cranes build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
