//! Wizard step progression
//!
//! ```text
//! ContractLookup (1) <-> IncidentEntry (2) <-> ExpertAssignment (3)
//!        ^                                            |
//!        +------------- claim created ----------------+
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claim::ClaimDraft;

/// A wizard step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    /// Find the contract the claim is filed against
    #[default]
    ContractLookup,
    /// Describe the incident
    IncidentEntry,
    /// Pick an appointment date and an expert
    ExpertAssignment,
}

impl Step {
    /// All steps in order
    pub const ALL: [Step; 3] = [Step::ContractLookup, Step::IncidentEntry, Step::ExpertAssignment];

    /// One-based position of the step
    pub fn number(self) -> u8 {
        match self {
            Step::ContractLookup => 1,
            Step::IncidentEntry => 2,
            Step::ExpertAssignment => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ContractLookup => "contract lookup",
            Step::IncidentEntry => "incident entry",
            Step::ExpertAssignment => "expert assignment",
        };
        f.write_str(name)
    }
}

/// Owns the current step and decides whether it may move forward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepController {
    current: Step,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    /// Whether the current step holds enough data to move on
    ///
    /// The last step has no forward gate: submitting is its exit.
    pub fn can_advance(&self, contract_resolved: bool, draft: &ClaimDraft) -> bool {
        match self.current {
            Step::ContractLookup => contract_resolved,
            Step::IncidentEntry => draft.is_incident_complete(),
            Step::ExpertAssignment => true,
        }
    }

    /// Moves one step forward; stays put on the last step
    ///
    /// The gate is not consulted here, callers check [`Self::can_advance`].
    pub fn advance(&mut self) -> Step {
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        self.current
    }

    /// Moves one step back; stays put on the first step
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    /// Returns to the first step
    pub fn restart(&mut self) {
        self.current = Step::ContractLookup;
    }
}
