//! Shared test utilities for the wind-contours workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic time slice generators
//! - Deterministic sample shuffling
//! - Common test fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in integration tests or benchmarks:
//!
//! ```ignore
//! use test_utils::{create_vortex_slice, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;
