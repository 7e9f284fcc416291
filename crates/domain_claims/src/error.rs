//! Claim wizard errors

use thiserror::Error;

use core_kernel::ExpertId;
use crate::step::Step;

/// Errors returned by the claim wizard
///
/// Remote failures never surface here; they are turned into notifications at
/// the call site. Only navigation and submission preconditions are reported
/// back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Cannot leave the {step} step until it is complete")]
    StepIncomplete { step: Step },

    #[error("Find a contract before submitting the claim")]
    ContractNotResolved,

    #[error("Expert {expert_id} is not available on the selected appointment date")]
    StaleExpertSelection { expert_id: ExpertId },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl WizardError {
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        WizardError::InvalidField {
            field,
            value: value.into(),
        }
    }
}
