//! Claim wizard session
//!
//! [`ClaimWizard`] owns one [`WizardState`] together with the gateway and the
//! notification sink it reports to. Operations take `&self`: state changes
//! are short synchronous updates of a `watch` channel, so a front end may
//! keep several remote calls in flight and every subscriber sees each change.
//!
//! # Example
//!
//! ```rust,ignore
//! let wizard = ClaimWizard::new(gateway, Arc::new(TracingNotificationSink));
//!
//! wizard.set_contract_query("C-100");
//! wizard.search_contract().await;
//! wizard.next_step()?;
//!
//! wizard.update_claim(ClaimField::IncidentType(Some(IncidentType::Fire)));
//! wizard.update_claim(ClaimField::Description("Kitchen fire".into()));
//! wizard.next_step()?;
//!
//! wizard.change_appointment_date(Some(date)).await;
//! wizard.select_expert(Some(expert_id));
//! wizard.submit_claim().await?;
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use uuid::Uuid;

use core_kernel::{ClaimId, ExpertId, OperationMetadata};

use crate::claim::ClaimField;
use crate::contract::Contract;
use crate::error::WizardError;
use crate::notification::{Notification, NotificationSink};
use crate::ports::ClaimWizardGateway;
use crate::state::WizardState;
use crate::step::Step;

const CONTRACT_FOUND: &str = "Contract found";
const CONTRACT_NOT_FOUND: &str = "Contract not found";
const SERVER_ISSUE: &str = "Server issue or invalid access";
const NO_EXPERT_AVAILABLE: &str = "No expert available at this time";

/// Result of a contract search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractLookup {
    /// A contract was found and is now the session's contract
    Found(Contract),
    /// No contract carries the searched number; the session has none
    NotFound,
    /// The remote call failed; the previous contract is kept
    Failed(String),
    /// A later search was issued before this answer arrived
    Superseded,
}

/// Result of changing the appointment date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpertQuery {
    /// The date was cleared, nothing was queried
    Cleared,
    /// Expert options were replaced with this many entries
    Loaded(usize),
    /// A later date change was issued before this answer arrived
    Superseded,
    /// The remote call failed; the previous options are kept
    Failed(String),
}

/// Result of a submission that reached the remote system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The claim was created and the session restarted
    Created(ClaimId),
    /// The remote system refused the claim; nothing changed locally
    Rejected(String),
}

/// A claim intake session
pub struct ClaimWizard {
    gateway: Arc<dyn ClaimWizardGateway>,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<WizardState>,
    contract_generation: AtomicU64,
    expert_generation: AtomicU64,
    session_id: Uuid,
    operator: Option<String>,
}

impl ClaimWizard {
    /// Starts a fresh session
    pub fn new(gateway: Arc<dyn ClaimWizardGateway>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            gateway,
            notifier,
            state: watch::Sender::new(WizardState::new()),
            contract_generation: AtomicU64::new(0),
            expert_generation: AtomicU64::new(0),
            session_id: Uuid::now_v7(),
            operator: None,
        }
    }

    /// Tags every remote call with the operator running the session
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Receives a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.state.subscribe()
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn current_step(&self) -> Step {
        self.state.borrow().step()
    }

    pub fn can_advance(&self) -> bool {
        self.state.borrow().can_advance()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn set_contract_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.set_contract_query(query));
    }

    pub fn update_claim(&self, field: ClaimField) {
        self.state.send_modify(|state| state.apply_claim_field(field));
    }

    /// Selects an expert; validity is checked at submission
    pub fn select_expert(&self, expert_id: Option<ExpertId>) {
        self.state.send_modify(|state| state.select_expert(expert_id));
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves forward if the current step is complete
    pub fn next_step(&self) -> Result<Step, WizardError> {
        let mut outcome = Err(WizardError::StepIncomplete {
            step: Step::ContractLookup,
        });
        self.state.send_if_modified(|state| {
            let step = state.step();
            if !state.can_advance() {
                outcome = Err(WizardError::StepIncomplete { step });
                return false;
            }
            let next = state.advance();
            outcome = Ok(next);
            next != step
        });

        match &outcome {
            Ok(step) => tracing::debug!(session_id = %self.session_id, step = step.number(), "Advanced"),
            Err(error) => tracing::debug!(session_id = %self.session_id, %error, "Advance blocked"),
        }
        outcome
    }

    /// Moves back one step; stays on the first step
    pub fn previous_step(&self) -> Step {
        let mut current = Step::ContractLookup;
        self.state.send_if_modified(|state| {
            let before = state.step();
            current = state.retreat();
            current != before
        });
        current
    }

    /// Discards everything entered so far
    pub fn start_new_session(&self) {
        self.contract_generation.fetch_add(1, Ordering::SeqCst);
        self.expert_generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(WizardState::new());
        tracing::info!(session_id = %self.session_id, "Wizard reset");
    }

    // ------------------------------------------------------------------
    // Remote operations
    // ------------------------------------------------------------------

    /// Searches the contract matching the current query
    ///
    /// Only the most recent search may change the contract: answers to
    /// earlier searches are dropped without notifying.
    pub async fn search_contract(&self) -> ContractLookup {
        let generation = self.contract_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let contract_number = self.state.borrow().contract_query().to_string();
        tracing::info!(session_id = %self.session_id, %contract_number, "Searching contract");

        let response = self
            .gateway
            .find_contract(&contract_number, Some(self.metadata("find_contract")))
            .await;

        if self.contract_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                session_id = %self.session_id,
                %contract_number,
                generation,
                "Discarding superseded contract lookup"
            );
            return ContractLookup::Superseded;
        }

        match response {
            Ok(Some(record)) => {
                let contract = Contract::from_record(record);
                let stored = contract.clone();
                self.state.send_modify(|state| state.set_contract(Some(stored)));
                self.notifier.notify(Notification::success(CONTRACT_FOUND));
                ContractLookup::Found(contract)
            }
            Ok(None) => {
                self.state.send_modify(|state| state.set_contract(None));
                self.notifier.notify(Notification::error(CONTRACT_NOT_FOUND));
                ContractLookup::NotFound
            }
            Err(error) => {
                tracing::error!(
                    session_id = %self.session_id,
                    %contract_number,
                    %error,
                    "Contract lookup failed"
                );
                self.notifier.notify(Notification::error(SERVER_ISSUE));
                ContractLookup::Failed(error.to_string())
            }
        }
    }

    /// Stores the appointment date and loads the experts free on it
    ///
    /// Only the most recent date change may update the options: answers to
    /// earlier changes are dropped without notifying.
    pub async fn change_appointment_date(&self, date: Option<NaiveDate>) -> ExpertQuery {
        let generation = self.expert_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.set_appointment_date(date));

        let Some(target_date) = date else {
            return ExpertQuery::Cleared;
        };

        let response = self
            .gateway
            .list_available_experts(target_date, Some(self.metadata("list_available_experts")))
            .await;

        if self.expert_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                session_id = %self.session_id,
                %target_date,
                generation,
                "Discarding superseded expert availability"
            );
            return ExpertQuery::Superseded;
        }

        match response {
            Ok(records) => {
                let count = records.len();
                self.state.send_modify(|state| state.replace_expert_options(records));
                tracing::info!(session_id = %self.session_id, %target_date, count, "Experts loaded");
                if count == 0 {
                    self.notifier.notify(Notification::warning(NO_EXPERT_AVAILABLE));
                }
                ExpertQuery::Loaded(count)
            }
            Err(error) => {
                tracing::error!(
                    session_id = %self.session_id,
                    %target_date,
                    %error,
                    "Expert availability lookup failed"
                );
                self.notifier.notify(Notification::error(SERVER_ISSUE));
                ExpertQuery::Failed(error.to_string())
            }
        }
    }

    /// Creates the claim from the current state
    ///
    /// # Errors
    ///
    /// Returns `WizardError::ContractNotResolved` or
    /// `WizardError::StaleExpertSelection` without calling the remote system.
    /// Remote failures are not errors here; they come back as
    /// [`Submission::Rejected`].
    pub async fn submit_claim(&self) -> Result<Submission, WizardError> {
        let prepared = self.state.borrow().build_submission();
        let submission = match prepared {
            Ok(submission) => submission,
            Err(error) => {
                tracing::warn!(session_id = %self.session_id, %error, "Submission refused");
                self.notifier.notify(Notification::error(error.to_string()));
                return Err(error);
            }
        };

        match self
            .gateway
            .create_claim(submission, Some(self.metadata("create_claim")))
            .await
        {
            Ok(claim_id) => {
                tracing::info!(session_id = %self.session_id, %claim_id, "Claim created");
                self.notifier
                    .notify(Notification::success(format!("Claim created: {claim_id}")));
                self.state.send_modify(|state| state.restart_after_submission());
                Ok(Submission::Created(claim_id))
            }
            Err(error) => {
                tracing::error!(session_id = %self.session_id, %error, "Claim creation failed");
                let message = error.user_message();
                self.notifier.notify(Notification::error(message.clone()));
                Ok(Submission::Rejected(message))
            }
        }
    }

    fn metadata(&self, operation: &str) -> OperationMetadata {
        let metadata = OperationMetadata::with_correlation_id(self.session_id.to_string())
            .with_context("operation", operation);
        match &self.operator {
            Some(operator) => metadata.initiated_by(operator.clone()),
            None => metadata,
        }
    }
}

impl std::fmt::Debug for ClaimWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimWizard")
            .field("session_id", &self.session_id)
            .field("operator", &self.operator)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
