//! Claim Intake Domain
//!
//! This crate implements the three-step wizard an operator uses to open a
//! claim: find the contract, describe the incident, then book an expert and
//! submit.
//!
//! # Wizard Steps
//!
//! ```text
//! ContractLookup -> IncidentEntry -> ExpertAssignment -> (claim created) -> ContractLookup
//! ```
//!
//! Forward moves are gated: a contract must be resolved to leave the first
//! step, and an incident type plus a description are needed to leave the
//! second. Remote calls go through the [`ClaimWizardGateway`] port and every
//! outcome is reported through a [`NotificationSink`].

pub mod claim;
pub mod contract;
pub mod expert;
pub mod step;
pub mod state;
pub mod notification;
pub mod ports;
pub mod adapters;
pub mod wizard;
pub mod error;

pub use claim::{ClaimDraft, ClaimField, ClaimSubmission, IncidentType, Priority};
pub use contract::{AccountSummary, Contract, ContractRecord, PropertySummary};
pub use expert::{ExpertOption, ExpertRecord};
pub use step::{Step, StepController};
pub use state::WizardState;
pub use notification::{Notification, NotificationSink, Severity, TracingNotificationSink};
pub use ports::ClaimWizardGateway;
pub use adapters::{HttpClaimGateway, HttpGatewayConfig};
pub use wizard::{ClaimWizard, ContractLookup, ExpertQuery, Submission};
pub use error::WizardError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{GatewayOperation, MockClaimWizardGateway};
#[cfg(any(test, feature = "mock"))]
pub use notification::mock::RecordingNotificationSink;
