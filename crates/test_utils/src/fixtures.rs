//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for contracts, experts and dates. Fixtures are
//! deterministic so assertions can compare against literal values.

use chrono::NaiveDate;
use core_kernel::{AccountId, ClaimId, ContractId, ExpertId};
use domain_claims::{AccountSummary, ContractRecord, ExpertRecord, PropertySummary};

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Contract id of the fully linked contract
    pub fn linked_contract_id() -> ContractId {
        ContractId::new("800LINKED").unwrap()
    }

    /// Contract id of the contract without a property
    pub fn bare_contract_id() -> ContractId {
        ContractId::new("800BARE").unwrap()
    }

    /// Contract id of the contract without account or property
    pub fn orphan_contract_id() -> ContractId {
        ContractId::new("800ORPHAN").unwrap()
    }

    pub fn account_id() -> AccountId {
        AccountId::new("001DUPONT").unwrap()
    }

    pub fn curie_id() -> ExpertId {
        ExpertId::new("005CURIE").unwrap()
    }

    pub fn pasteur_id() -> ExpertId {
        ExpertId::new("005PASTEUR").unwrap()
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new("CLM-42").unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Number of the contract with account and property
    pub fn linked_contract_number() -> &'static str {
        "C-200"
    }

    /// Number of the contract with an account but no property
    pub fn bare_contract_number() -> &'static str {
        "C-100"
    }

    /// Number of the contract with neither account nor property
    pub fn orphan_contract_number() -> &'static str {
        "C-300"
    }

    /// A contract number the remote system does not know
    pub fn unknown_contract_number() -> &'static str {
        "UNKNOWN"
    }

    pub fn account_name() -> &'static str {
        "Dupont SARL"
    }

    pub fn property_address() -> &'static str {
        "12 Rue de la Paix, 75002 Paris"
    }

    pub fn incident_description() -> &'static str {
        "Water leaking from the upstairs bathroom into the office"
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Contract term start
    pub fn term_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Contract term end
    pub fn term_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Standard incident date
    pub fn incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Appointment date with experts available
    pub fn staffed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    /// Appointment date with a different expert available
    pub fn alternate_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 19).unwrap()
    }

    /// Appointment date with nobody available
    pub fn empty_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 24).unwrap()
    }
}

/// Fixture for contract records as returned by the remote system
pub struct ContractFixtures;

impl ContractFixtures {
    /// Contract with account and insured property
    pub fn linked() -> ContractRecord {
        ContractRecord {
            id: IdFixtures::linked_contract_id(),
            contract_number: StringFixtures::linked_contract_number().to_string(),
            start_date: Some(DateFixtures::term_start()),
            end_date: Some(DateFixtures::term_end()),
            account_id: Some(IdFixtures::account_id()),
            account: Some(AccountSummary {
                name: Some(StringFixtures::account_name().to_string()),
            }),
            property: Some(PropertySummary {
                name: Some("Head Office".to_string()),
                property_type: Some("Commercial".to_string()),
                address: Some(StringFixtures::property_address().to_string()),
            }),
        }
    }

    /// Contract with an account but no insured property
    pub fn without_property() -> ContractRecord {
        ContractRecord {
            id: IdFixtures::bare_contract_id(),
            contract_number: StringFixtures::bare_contract_number().to_string(),
            property: None,
            ..Self::linked()
        }
    }

    /// Contract with neither account nor property
    pub fn orphan() -> ContractRecord {
        ContractRecord {
            id: IdFixtures::orphan_contract_id(),
            contract_number: StringFixtures::orphan_contract_number().to_string(),
            account_id: None,
            account: None,
            property: None,
            ..Self::linked()
        }
    }

    /// Every contract fixture
    pub fn all() -> Vec<ContractRecord> {
        vec![Self::linked(), Self::without_property(), Self::orphan()]
    }
}

/// Fixture for expert records
pub struct ExpertFixtures;

impl ExpertFixtures {
    pub fn curie() -> ExpertRecord {
        ExpertRecord {
            id: IdFixtures::curie_id(),
            name: "Marie Curie".to_string(),
        }
    }

    pub fn pasteur() -> ExpertRecord {
        ExpertRecord {
            id: IdFixtures::pasteur_id(),
            name: "Louis Pasteur".to_string(),
        }
    }

    /// Experts available on [`DateFixtures::staffed_day`]
    pub fn staffed_day_roster() -> Vec<ExpertRecord> {
        vec![Self::curie(), Self::pasteur()]
    }

    /// Experts available on [`DateFixtures::alternate_day`]
    pub fn alternate_day_roster() -> Vec<ExpertRecord> {
        vec![Self::pasteur()]
    }
}
