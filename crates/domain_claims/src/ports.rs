//! Claim Wizard Ports
//!
//! The wizard reaches the remote system of record through a single port,
//! [`ClaimWizardGateway`]. Adapters decide how the calls travel:
//!
//! - **HTTP Adapter**: REST calls to the claims back office (`adapters::http`)
//! - **Mock Adapter**: In-memory double for tests (`ports::mock`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimWizard, ClaimWizardGateway, TracingNotificationSink};
//! use std::sync::Arc;
//!
//! let gateway: Arc<dyn ClaimWizardGateway> = Arc::new(HttpClaimGateway::new(config)?);
//! let wizard = ClaimWizard::new(gateway, Arc::new(TracingNotificationSink));
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ClaimId, DomainPort, OperationMetadata, PortError};

use crate::claim::ClaimSubmission;
use crate::contract::ContractRecord;
use crate::expert::ExpertRecord;

/// Remote operations the claim wizard depends on
///
/// Each call is a one-shot request/response. Timeouts and retries are the
/// adapter's business; the wizard only sees the final `Result`.
#[async_trait]
pub trait ClaimWizardGateway: DomainPort {
    /// Looks a contract up by its number
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no contract carries that number
    async fn find_contract(
        &self,
        contract_number: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<ContractRecord>, PortError>;

    /// Lists experts free on the given date, in the remote system's order
    async fn list_available_experts(
        &self,
        target_date: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ExpertRecord>, PortError>;

    /// Creates the claim and books the expert appointment
    ///
    /// # Returns
    ///
    /// The identifier of the new claim, or `PortError::Rejected` carrying
    /// the remote system's explanation
    async fn create_claim(
        &self,
        submission: ClaimSubmission,
        metadata: Option<OperationMetadata>,
    ) -> Result<ClaimId, PortError>;
}

/// Mock implementation of ClaimWizardGateway for testing
///
/// Stores contracts and expert calendars in memory, can be told to fail or
/// to answer slowly, and records every claim submitted to it.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;
    use tokio::sync::RwLock;

    /// Operations of the gateway, used to script failures
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum GatewayOperation {
        FindContract,
        ListAvailableExperts,
        CreateClaim,
    }

    /// In-memory mock implementation of ClaimWizardGateway
    #[derive(Debug, Default)]
    pub struct MockClaimWizardGateway {
        contracts: RwLock<HashMap<String, ContractRecord>>,
        experts: RwLock<HashMap<NaiveDate, Vec<ExpertRecord>>>,
        contract_delays: RwLock<HashMap<String, Duration>>,
        expert_delays: RwLock<HashMap<NaiveDate, Duration>>,
        failing: RwLock<HashSet<GatewayOperation>>,
        rejection: RwLock<Option<String>>,
        next_claim_id: RwLock<Option<ClaimId>>,
        submissions: RwLock<Vec<ClaimSubmission>>,
        calls: RwLock<Vec<GatewayOperation>>,
    }

    impl MockClaimWizardGateway {
        /// Creates a new mock gateway
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with contracts, keyed by contract number
        pub async fn with_contracts(contracts: Vec<ContractRecord>) -> Self {
            let gateway = Self::new();
            for contract in contracts {
                gateway.add_contract(contract).await;
            }
            gateway
        }

        pub async fn add_contract(&self, contract: ContractRecord) {
            self.contracts
                .write()
                .await
                .insert(contract.contract_number.clone(), contract);
        }

        /// Sets the experts available on a date
        pub async fn set_experts(&self, date: NaiveDate, experts: Vec<ExpertRecord>) {
            self.experts.write().await.insert(date, experts);
        }

        /// Delays lookup answers for a contract number
        pub async fn delay_contract(&self, contract_number: impl Into<String>, delay: Duration) {
            self.contract_delays.write().await.insert(contract_number.into(), delay);
        }

        /// Delays availability answers for a date
        pub async fn delay_experts(&self, date: NaiveDate, delay: Duration) {
            self.expert_delays.write().await.insert(date, delay);
        }

        /// Makes an operation fail with a connection error
        pub async fn fail(&self, operation: GatewayOperation) {
            self.failing.write().await.insert(operation);
        }

        /// Makes an operation succeed again
        pub async fn recover(&self, operation: GatewayOperation) {
            self.failing.write().await.remove(&operation);
        }

        /// Makes claim creation answer with a structured rejection
        pub async fn reject_claims(&self, message: impl Into<String>) {
            *self.rejection.write().await = Some(message.into());
        }

        /// Fixes the identifier returned by the next created claim
        pub async fn next_claim_id(&self, claim_id: ClaimId) {
            *self.next_claim_id.write().await = Some(claim_id);
        }

        /// Claims submitted so far, oldest first
        pub async fn submissions(&self) -> Vec<ClaimSubmission> {
            self.submissions.read().await.clone()
        }

        /// Number of times an operation was invoked
        pub async fn call_count(&self, operation: GatewayOperation) -> usize {
            self.calls
                .read()
                .await
                .iter()
                .filter(|call| **call == operation)
                .count()
        }

        async fn enter(&self, operation: GatewayOperation) -> Result<(), PortError> {
            self.calls.write().await.push(operation);
            if self.failing.read().await.contains(&operation) {
                return Err(PortError::connection(format!("{operation:?} unavailable")));
            }
            Ok(())
        }
    }

    impl DomainPort for MockClaimWizardGateway {}

    #[async_trait]
    impl ClaimWizardGateway for MockClaimWizardGateway {
        async fn find_contract(
            &self,
            contract_number: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<ContractRecord>, PortError> {
            let delay = self.contract_delays.read().await.get(contract_number).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.enter(GatewayOperation::FindContract).await?;
            Ok(self.contracts.read().await.get(contract_number).cloned())
        }

        async fn list_available_experts(
            &self,
            target_date: NaiveDate,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<ExpertRecord>, PortError> {
            let delay = self.expert_delays.read().await.get(&target_date).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.enter(GatewayOperation::ListAvailableExperts).await?;
            Ok(self
                .experts
                .read()
                .await
                .get(&target_date)
                .cloned()
                .unwrap_or_default())
        }

        async fn create_claim(
            &self,
            submission: ClaimSubmission,
            _metadata: Option<OperationMetadata>,
        ) -> Result<ClaimId, PortError> {
            self.enter(GatewayOperation::CreateClaim).await?;
            if let Some(message) = self.rejection.read().await.clone() {
                return Err(PortError::rejected(message));
            }

            let mut submissions = self.submissions.write().await;
            submissions.push(submission);
            let claim_id = match self.next_claim_id.write().await.take() {
                Some(claim_id) => claim_id,
                None => ClaimId::new(format!("CLM-{}", submissions.len()))
                    .map_err(|error| PortError::internal(error.to_string()))?,
            };
            Ok(claim_id)
        }
    }
}
