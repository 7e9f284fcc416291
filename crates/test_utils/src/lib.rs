//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim intake wizard test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built contracts, experts and dates
//! - `builders`: Builder patterns for test data and a wired wizard harness
//! - `assertions`: Custom assertion helpers for notifications and contracts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
