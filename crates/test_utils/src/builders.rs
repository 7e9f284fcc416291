//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{AccountId, ContractId};
use domain_claims::{
    AccountSummary, ClaimField, ClaimWizard, ContractRecord, IncidentType,
    MockClaimWizardGateway, PropertySummary, RecordingNotificationSink, Step,
};

use crate::fixtures::{ContractFixtures, DateFixtures, ExpertFixtures, StringFixtures};

/// Builder for contract records as the remote system returns them
pub struct ContractRecordBuilder {
    record: ContractRecord,
}

impl Default for ContractRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractRecordBuilder {
    /// Starts from the fully linked contract fixture
    pub fn new() -> Self {
        Self {
            record: ContractFixtures::linked(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.record.id = ContractId::new(id).unwrap();
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.record.contract_number = number.into();
        self
    }

    pub fn with_term(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.record.start_date = start;
        self.record.end_date = end;
        self
    }

    pub fn with_account(mut self, id: &str, name: Option<&str>) -> Self {
        self.record.account_id = Some(AccountId::new(id).unwrap());
        self.record.account = Some(AccountSummary {
            name: name.map(str::to_string),
        });
        self
    }

    pub fn without_account(mut self) -> Self {
        self.record.account_id = None;
        self.record.account = None;
        self
    }

    pub fn with_property(
        mut self,
        name: Option<&str>,
        property_type: Option<&str>,
        address: Option<&str>,
    ) -> Self {
        self.record.property = Some(PropertySummary {
            name: name.map(str::to_string),
            property_type: property_type.map(str::to_string),
            address: address.map(str::to_string),
        });
        self
    }

    pub fn without_property(mut self) -> Self {
        self.record.property = None;
        self
    }

    pub fn build(self) -> ContractRecord {
        self.record
    }
}

/// A wizard wired to an in-memory gateway and a recording sink
pub struct WizardHarness {
    pub wizard: ClaimWizard,
    pub gateway: Arc<MockClaimWizardGateway>,
    pub sink: Arc<RecordingNotificationSink>,
}

impl WizardHarness {
    /// Harness whose gateway knows every contract and expert fixture
    pub async fn seeded() -> Self {
        let gateway = MockClaimWizardGateway::with_contracts(ContractFixtures::all()).await;
        gateway
            .set_experts(DateFixtures::staffed_day(), ExpertFixtures::staffed_day_roster())
            .await;
        gateway
            .set_experts(DateFixtures::alternate_day(), ExpertFixtures::alternate_day_roster())
            .await;
        Self::with_gateway(gateway)
    }

    pub fn with_gateway(gateway: MockClaimWizardGateway) -> Self {
        let gateway = Arc::new(gateway);
        let sink = Arc::new(RecordingNotificationSink::new());
        let wizard = ClaimWizard::new(gateway.clone(), sink.clone());
        Self { wizard, gateway, sink }
    }

    /// Resolves a contract and fills the incident step
    ///
    /// Leaves the wizard on the expert step with the sink cleared.
    pub async fn walk_to_expert_step(&self, contract_number: &str) {
        self.wizard.set_contract_query(contract_number);
        self.wizard.search_contract().await;
        self.wizard.next_step().expect("contract step should be complete");

        self.wizard
            .update_claim(ClaimField::IncidentDate(Some(DateFixtures::incident_date())));
        self.wizard
            .update_claim(ClaimField::IncidentType(Some(IncidentType::WaterDamage)));
        self.wizard.update_claim(ClaimField::Description(
            StringFixtures::incident_description().to_string(),
        ));
        let step = self.wizard.next_step().expect("incident step should be complete");
        assert_eq!(step, Step::ExpertAssignment);

        self.sink.clear();
    }
}
