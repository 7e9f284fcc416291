//! Core Kernel - Foundational types for the claim intake wizard
//!
//! This crate provides the building blocks shared by the other crates:
//! - Typed identifiers for records owned by the remote system
//! - Common error types
//! - Port infrastructure for swappable adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{ContractId, AccountId, ExpertId, ClaimId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, OperationMetadata};
