//! Wizard session state

use chrono::NaiveDate;

use core_kernel::ExpertId;
use crate::claim::{ClaimDraft, ClaimField, ClaimSubmission};
use crate::contract::Contract;
use crate::error::WizardError;
use crate::expert::{ExpertOption, ExpertRecord};
use crate::step::{Step, StepController};

/// Everything the operator has entered or resolved during one session
///
/// Read access is public; mutation is reserved to the wizard so that the
/// step only ever moves through the [`StepController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    steps: StepController,
    contract_query: String,
    contract: Option<Contract>,
    claim_draft: ClaimDraft,
    appointment_date: Option<NaiveDate>,
    expert_options: Vec<ExpertOption>,
    selected_expert_id: Option<ExpertId>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.steps.current_step()
    }

    pub fn contract_query(&self) -> &str {
        &self.contract_query
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn claim_draft(&self) -> &ClaimDraft {
        &self.claim_draft
    }

    pub fn appointment_date(&self) -> Option<NaiveDate> {
        self.appointment_date
    }

    pub fn expert_options(&self) -> &[ExpertOption] {
        &self.expert_options
    }

    pub fn selected_expert_id(&self) -> Option<&ExpertId> {
        self.selected_expert_id.as_ref()
    }

    /// The selected expert, if it is among the current options
    pub fn selected_expert(&self) -> Option<&ExpertOption> {
        let selected = self.selected_expert_id.as_ref()?;
        self.expert_options.iter().find(|option| &option.id == selected)
    }

    /// Whether forward navigation is allowed from the current step
    pub fn can_advance(&self) -> bool {
        self.steps.can_advance(self.contract.is_some(), &self.claim_draft)
    }

    /// Assembles the create-claim payload from the current state
    ///
    /// Fails when no contract has been resolved or when the selected expert
    /// is not part of the options returned for the current appointment date.
    pub fn build_submission(&self) -> Result<ClaimSubmission, WizardError> {
        let contract = self.contract.as_ref().ok_or(WizardError::ContractNotResolved)?;

        if let Some(expert_id) = &self.selected_expert_id {
            if self.selected_expert().is_none() {
                return Err(WizardError::StaleExpertSelection {
                    expert_id: expert_id.clone(),
                });
            }
        }

        Ok(ClaimSubmission {
            new_claim: self
                .claim_draft
                .bind(contract.id.clone(), self.selected_expert_id.clone()),
            expert_id: self.selected_expert_id.clone(),
            appointment_date: self.appointment_date,
            location_address: contract.property_address.clone(),
        })
    }

    pub(crate) fn set_contract_query(&mut self, query: String) {
        self.contract_query = query;
    }

    pub(crate) fn set_contract(&mut self, contract: Option<Contract>) {
        self.contract = contract;
    }

    pub(crate) fn apply_claim_field(&mut self, field: ClaimField) {
        self.claim_draft.apply(field);
    }

    pub(crate) fn set_appointment_date(&mut self, date: Option<NaiveDate>) {
        self.appointment_date = date;
    }

    pub(crate) fn replace_expert_options(&mut self, records: Vec<ExpertRecord>) {
        self.expert_options = records.into_iter().map(ExpertOption::from).collect();
    }

    pub(crate) fn select_expert(&mut self, expert_id: Option<ExpertId>) {
        self.selected_expert_id = expert_id;
    }

    pub(crate) fn advance(&mut self) -> Step {
        self.steps.advance()
    }

    pub(crate) fn retreat(&mut self) -> Step {
        self.steps.retreat()
    }

    /// Back to the first step with no contract; the rest is kept
    pub(crate) fn restart_after_submission(&mut self) {
        self.steps.restart();
        self.contract = None;
    }
}
