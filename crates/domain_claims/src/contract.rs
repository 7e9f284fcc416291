//! Contract records and their normalization
//!
//! The remote system returns a contract together with optional related
//! account and property records. Everything downstream (the wizard screens
//! and the claim submission) expects plain strings, so related fields are
//! normalized once, when the record is received, with fixed placeholders
//! standing in for anything missing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, ContractId};

/// Placeholder account name when no account is linked
pub const UNKNOWN_CLIENT: &str = "Unknown Client";
/// Placeholder property name when no property is linked
pub const NO_PROPERTY_ASSIGNED: &str = "No Property Assigned";
/// Placeholder for property type and address when unknown
pub const NOT_AVAILABLE: &str = "-";

/// Account related to a contract, as returned by the remote system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    #[serde(default)]
    pub name: Option<String>,
}

/// Insured property related to a contract, as returned by the remote system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Raw contract record from the remote system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: ContractId,
    pub contract_number: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub account: Option<AccountSummary>,
    #[serde(default)]
    pub property: Option<PropertySummary>,
}

/// A contract resolved by the lookup step
///
/// Unlike [`ContractRecord`], every display field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub number: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub account_id: Option<AccountId>,
    pub account_name: String,
    pub property_name: String,
    pub property_type: String,
    pub property_address: String,
}

impl Contract {
    /// Normalizes a remote record, filling absent relations with placeholders
    pub fn from_record(record: ContractRecord) -> Self {
        let account_name = record
            .account
            .and_then(|account| account.name)
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

        let property = record.property.unwrap_or_default();

        Self {
            id: record.id,
            number: record.contract_number,
            start_date: record.start_date,
            end_date: record.end_date,
            account_id: record.account_id,
            account_name,
            property_name: property
                .name
                .unwrap_or_else(|| NO_PROPERTY_ASSIGNED.to_string()),
            property_type: property
                .property_type
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            property_address: property
                .address
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// Whether the contract has an insured property linked
    pub fn has_property(&self) -> bool {
        self.property_name != NO_PROPERTY_ASSIGNED
    }
}

impl From<ContractRecord> for Contract {
    fn from(record: ContractRecord) -> Self {
        Contract::from_record(record)
    }
}
