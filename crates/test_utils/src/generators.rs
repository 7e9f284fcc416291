//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating remote records and operator
//! input the wizard must cope with.

use chrono::{Duration, NaiveDate};
use core_kernel::{AccountId, ContractId, ExpertId};
use domain_claims::{
    AccountSummary, ClaimField, ContractRecord, ExpertRecord, IncidentType, Priority,
    PropertySummary,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

/// Strategy for every incident type
pub fn incident_type_strategy() -> impl Strategy<Value = IncidentType> {
    proptest::sample::select(IncidentType::ALL.to_vec())
}

/// Strategy for every priority
pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    proptest::sample::select(Priority::ALL.to_vec())
}

/// Strategy for identifier-shaped strings
pub fn id_text_strategy() -> impl Strategy<Value = String> {
    "[0-9A-Za-z]{6,18}"
}

/// Strategy for contract numbers such as `C-1042`
pub fn contract_number_strategy() -> impl Strategy<Value = String> {
    "C-[0-9]{1,6}"
}

/// Strategy for dates in a ten year window starting 2020-01-01
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for optional, non-blank display text
pub fn optional_text_strategy() -> impl Strategy<Value = Option<String>> {
    option::of("[A-Za-z0-9][A-Za-z0-9 ,.-]{0,39}")
}

/// Strategy for an account relation, sometimes without a name
pub fn account_strategy() -> impl Strategy<Value = Option<AccountSummary>> {
    option::of(optional_text_strategy().prop_map(|name| AccountSummary { name }))
}

/// Strategy for a property relation with any subset of fields present
pub fn property_strategy() -> impl Strategy<Value = Option<PropertySummary>> {
    option::of(
        (
            optional_text_strategy(),
            optional_text_strategy(),
            optional_text_strategy(),
        )
            .prop_map(|(name, property_type, address)| PropertySummary {
                name,
                property_type,
                address,
            }),
    )
}

/// Strategy for contract records with arbitrary missing relations
pub fn contract_record_strategy() -> impl Strategy<Value = ContractRecord> {
    (
        id_text_strategy(),
        contract_number_strategy(),
        option::of(date_strategy()),
        option::of(id_text_strategy()),
        account_strategy(),
        property_strategy(),
    )
        .prop_map(|(id, number, start, account_id, account, property)| ContractRecord {
            id: ContractId::new(id).unwrap(),
            contract_number: number,
            start_date: start,
            end_date: start.map(|date| date + Duration::days(365)),
            account_id: account_id.map(|id| AccountId::new(id).unwrap()),
            account,
            property,
        })
}

/// Strategy for an expert roster with distinct identifiers
pub fn expert_roster_strategy(max: usize) -> impl Strategy<Value = Vec<ExpertRecord>> {
    proptest::collection::btree_set(id_text_strategy(), 0..=max).prop_map(|ids| {
        ids.into_iter()
            .enumerate()
            .map(|(index, id)| ExpertRecord {
                id: ExpertId::new(id).unwrap(),
                name: format!("Expert {}", index + 1),
            })
            .collect()
    })
}

/// Strategy for a single operator edit to the draft
pub fn claim_field_strategy() -> impl Strategy<Value = ClaimField> {
    prop_oneof![
        option::of(date_strategy()).prop_map(ClaimField::IncidentDate),
        option::of(incident_type_strategy()).prop_map(ClaimField::IncidentType),
        priority_strategy().prop_map(ClaimField::Priority),
        "[a-z ]{0,30}".prop_map(ClaimField::Description),
    ]
}

/// Strategy for a sequence of operator edits
pub fn claim_edits_strategy() -> impl Strategy<Value = Vec<ClaimField>> {
    vec(claim_field_strategy(), 0..20)
}
