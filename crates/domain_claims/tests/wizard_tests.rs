//! End-to-end tests for the claim wizard against the in-memory gateway

use std::time::Duration;

use proptest::prelude::*;

use domain_claims::contract::{NOT_AVAILABLE, NO_PROPERTY_ASSIGNED, UNKNOWN_CLIENT};
use domain_claims::{
    ClaimDraft, ClaimField, Contract, ContractLookup, ExpertQuery, GatewayOperation,
    MockClaimWizardGateway, Priority, Severity, Step, Submission, WizardError,
};
use test_utils::{
    assert_contract_displayable, assert_last_notification, assert_no_notifications,
    assert_single_notification, claim_edits_strategy, contract_record_strategy,
    ContractFixtures, ContractRecordBuilder, DateFixtures, ExpertFixtures, IdFixtures,
    StringFixtures, WizardHarness,
};

// ============================================================================
// Contract Lookup Tests
// ============================================================================

mod contract_lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_contract_without_property_gets_placeholders() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::bare_contract_number());

        let lookup = harness.wizard.search_contract().await;

        let ContractLookup::Found(contract) = lookup else {
            panic!("Expected the contract to be found, got {lookup:?}");
        };
        assert_eq!(contract.account_name, StringFixtures::account_name());
        assert_eq!(contract.property_name, NO_PROPERTY_ASSIGNED);
        assert_eq!(contract.property_type, NOT_AVAILABLE);
        assert_eq!(contract.property_address, NOT_AVAILABLE);
        assert!(!contract.has_property());

        assert_eq!(harness.wizard.snapshot().contract(), Some(&contract));
        assert_single_notification(&harness.sink, Severity::Success, "Contract found");
    }

    #[tokio::test]
    async fn test_orphan_contract_gets_unknown_client() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::orphan_contract_number());

        let ContractLookup::Found(contract) = harness.wizard.search_contract().await else {
            panic!("Expected the orphan contract to be found");
        };
        assert_eq!(contract.account_name, UNKNOWN_CLIENT);
        assert!(contract.account_id.is_none());
        assert_contract_displayable(&contract);
    }

    #[tokio::test]
    async fn test_linked_contract_keeps_remote_values() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::linked_contract_number());

        let ContractLookup::Found(contract) = harness.wizard.search_contract().await else {
            panic!("Expected the linked contract to be found");
        };
        assert_eq!(contract.id, IdFixtures::linked_contract_id());
        assert_eq!(contract.property_name, "Head Office");
        assert_eq!(contract.property_type, "Commercial");
        assert_eq!(contract.property_address, StringFixtures::property_address());
        assert_eq!(contract.start_date, Some(DateFixtures::term_start()));
    }

    #[tokio::test]
    async fn test_property_fields_fall_back_independently() {
        let record = ContractRecordBuilder::new()
            .with_number("C-400")
            .with_property(Some("Warehouse"), None, None)
            .build();
        let gateway = MockClaimWizardGateway::with_contracts(vec![record]).await;
        let harness = WizardHarness::with_gateway(gateway);

        harness.wizard.set_contract_query("C-400");
        let ContractLookup::Found(contract) = harness.wizard.search_contract().await else {
            panic!("Expected C-400 to be found");
        };
        assert_eq!(contract.property_name, "Warehouse");
        assert_eq!(contract.property_type, NOT_AVAILABLE);
        assert_eq!(contract.property_address, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_contract_clears_previous_result() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::linked_contract_number());
        harness.wizard.search_contract().await;

        harness.wizard.set_contract_query(StringFixtures::unknown_contract_number());
        let lookup = harness.wizard.search_contract().await;

        assert_eq!(lookup, ContractLookup::NotFound);
        assert!(harness.wizard.snapshot().contract().is_none());
        assert!(!harness.wizard.can_advance());
        assert_last_notification(&harness.sink, Severity::Error, "Contract not found");
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_previous_contract() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::linked_contract_number());
        harness.wizard.search_contract().await;
        harness.gateway.fail(GatewayOperation::FindContract).await;

        harness.wizard.set_contract_query(StringFixtures::bare_contract_number());
        let lookup = harness.wizard.search_contract().await;

        assert!(matches!(lookup, ContractLookup::Failed(_)));
        let snapshot = harness.wizard.snapshot();
        assert_eq!(
            snapshot.contract().map(|contract| contract.number.as_str()),
            Some(StringFixtures::linked_contract_number())
        );
        assert_eq!(snapshot.contract_query(), StringFixtures::bare_contract_number());
        assert_last_notification(&harness.sink, Severity::Error, "Server issue or invalid access");
    }

    #[tokio::test]
    async fn test_query_is_sent_verbatim() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(" C-200 ");

        assert_eq!(harness.wizard.search_contract().await, ContractLookup::NotFound);
        assert_eq!(harness.gateway.call_count(GatewayOperation::FindContract).await, 1);
    }

    #[tokio::test]
    async fn test_slow_answer_for_earlier_search_is_discarded() {
        let harness = WizardHarness::seeded().await;
        harness
            .gateway
            .delay_contract(StringFixtures::linked_contract_number(), Duration::from_millis(50))
            .await;

        let (first, second) = tokio::join!(
            async {
                harness.wizard.set_contract_query(StringFixtures::linked_contract_number());
                harness.wizard.search_contract().await
            },
            async {
                harness.wizard.set_contract_query(StringFixtures::bare_contract_number());
                harness.wizard.search_contract().await
            },
        );

        assert_eq!(first, ContractLookup::Superseded);
        assert!(matches!(second, ContractLookup::Found(_)));
        assert_eq!(
            harness.wizard.snapshot().contract().map(|contract| contract.id.clone()),
            Some(IdFixtures::bare_contract_id())
        );
        assert_single_notification(&harness.sink, Severity::Success, "Contract found");
    }

    #[tokio::test]
    async fn test_reset_discards_pending_search() {
        let harness = WizardHarness::seeded().await;
        harness
            .gateway
            .delay_contract(StringFixtures::linked_contract_number(), Duration::from_millis(50))
            .await;
        harness.wizard.set_contract_query(StringFixtures::linked_contract_number());

        let (lookup, ()) = tokio::join!(
            harness.wizard.search_contract(),
            async { harness.wizard.start_new_session() },
        );

        assert_eq!(lookup, ContractLookup::Superseded);
        assert!(harness.wizard.snapshot().contract().is_none());
        assert_no_notifications(&harness.sink);
    }
}

// ============================================================================
// Navigation Tests
// ============================================================================

mod navigation_tests {
    use super::*;

    #[tokio::test]
    async fn test_incident_step_requires_type_and_description() {
        let harness = WizardHarness::seeded().await;
        harness.wizard.set_contract_query(StringFixtures::linked_contract_number());
        harness.wizard.search_contract().await;
        assert_eq!(harness.wizard.next_step(), Ok(Step::IncidentEntry));

        harness
            .wizard
            .update_claim(ClaimField::Description("Broken window".to_string()));
        assert_eq!(
            harness.wizard.next_step(),
            Err(WizardError::StepIncomplete { step: Step::IncidentEntry })
        );
        assert_eq!(harness.wizard.current_step(), Step::IncidentEntry);
    }

    #[tokio::test]
    async fn test_back_navigation_keeps_entered_data() {
        let harness = WizardHarness::seeded().await;
        harness
            .walk_to_expert_step(StringFixtures::linked_contract_number())
            .await;

        assert_eq!(harness.wizard.previous_step(), Step::IncidentEntry);
        assert_eq!(harness.wizard.previous_step(), Step::ContractLookup);
        assert_eq!(harness.wizard.previous_step(), Step::ContractLookup);

        let snapshot = harness.wizard.snapshot();
        assert!(snapshot.contract().is_some());
        assert_eq!(
            snapshot.claim_draft().description,
            StringFixtures::incident_description()
        );
        assert_no_notifications(&harness.sink);
    }

    #[tokio::test]
    async fn test_subscribers_see_step_changes() {
        let harness = WizardHarness::seeded().await;
        let mut receiver = harness.wizard.subscribe();

        harness
            .walk_to_expert_step(StringFixtures::linked_contract_number())
            .await;

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().step(), Step::ExpertAssignment);

        harness.wizard.previous_step();
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().step(), Step::IncidentEntry);
    }

    #[tokio::test]
    async fn test_blocked_advance_does_not_wake_subscribers() {
        let harness = WizardHarness::seeded().await;
        let receiver = harness.wizard.subscribe();

        assert!(harness.wizard.next_step().is_err());
        assert!(!receiver.has_changed().unwrap());
    }
}

// ============================================================================
// Expert Availability Tests
// ============================================================================

mod expert_tests {
    use super::*;

    #[tokio::test]
    async fn test_staffed_day_loads_options_in_order() {
        let harness = WizardHarness::seeded().await;
        harness
            .walk_to_expert_step(StringFixtures::linked_contract_number())
            .await;

        let query = harness
            .wizard
            .change_appointment_date(Some(DateFixtures::staffed_day()))
            .await;

        assert_eq!(query, ExpertQuery::Loaded(2));
        let snapshot = harness.wizard.snapshot();
        let names: Vec<_> = snapshot
            .expert_options()
            .iter()
            .map(|option| option.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Marie Curie", "Louis Pasteur"]);
        assert_eq!(snapshot.appointment_date(), Some(DateFixtures::staffed_day()));
        assert_no_notifications(&harness.sink);
    }

    #[tokio::test]
    async fn test_empty_day_warns() {
        let harness = WizardHarness::seeded().await;

        let query = harness
            .wizard
            .change_appointment_date(Some(DateFixtures::empty_day()))
            .await;

        assert_eq!(query, ExpertQuery::Loaded(0));
        assert!(harness.wizard.snapshot().expert_options().is_empty());
        assert_single_notification(
            &harness.sink,
            Severity::Warning,
            "No expert available at this time",
        );
        assert_eq!(harness.sink.last().unwrap().title, "Info");
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_previous_options() {
        let harness = WizardHarness::seeded().await;
        harness
            .wizard
            .change_appointment_date(Some(DateFixtures::staffed_day()))
            .await;
        harness.gateway.fail(GatewayOperation::ListAvailableExperts).await;

        let query = harness
            .wizard
            .change_appointment_date(Some(DateFixtures::alternate_day()))
            .await;

        assert!(matches!(query, ExpertQuery::Failed(_)));
        assert_eq!(harness.wizard.snapshot().expert_options().len(), 2);
        assert_last_notification(&harness.sink, Severity::Error, "Server issue or invalid access");
    }

    #[tokio::test]
    async fn test_clearing_date_skips_remote_call() {
        let harness = WizardHarness::seeded().await;

        assert_eq!(harness.wizard.change_appointment_date(None).await, ExpertQuery::Cleared);
        assert_eq!(
            harness.gateway.call_count(GatewayOperation::ListAvailableExperts).await,
            0
        );
        assert_no_notifications(&harness.sink);
    }

    #[tokio::test]
    async fn test_slow_answer_for_earlier_date_is_discarded() {
        let harness = WizardHarness::seeded().await;
        harness
            .gateway
            .delay_experts(DateFixtures::staffed_day(), Duration::from_millis(50))
            .await;

        let (first, second) = tokio::join!(
            harness
                .wizard
                .change_appointment_date(Some(DateFixtures::staffed_day())),
            harness
                .wizard
                .change_appointment_date(Some(DateFixtures::alternate_day())),
        );

        assert_eq!(first, ExpertQuery::Superseded);
        assert_eq!(second, ExpertQuery::Loaded(1));
        let snapshot = harness.wizard.snapshot();
        assert_eq!(snapshot.appointment_date(), Some(DateFixtures::alternate_day()));
        assert_eq!(snapshot.expert_options()[0].id, IdFixtures::pasteur_id());
        assert_eq!(snapshot.expert_options().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_discards_pending_answer() {
        let harness = WizardHarness::seeded().await;
        harness
            .gateway
            .delay_experts(DateFixtures::staffed_day(), Duration::from_millis(50))
            .await;

        let (query, ()) = tokio::join!(
            harness
                .wizard
                .change_appointment_date(Some(DateFixtures::staffed_day())),
            async { harness.wizard.start_new_session() },
        );

        assert_eq!(query, ExpertQuery::Superseded);
        assert!(harness.wizard.snapshot().expert_options().is_empty());
        assert!(harness.wizard.snapshot().appointment_date().is_none());
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    async fn ready_harness() -> WizardHarness {
        let harness = WizardHarness::seeded().await;
        harness
            .walk_to_expert_step(StringFixtures::linked_contract_number())
            .await;
        harness
            .wizard
            .change_appointment_date(Some(DateFixtures::staffed_day()))
            .await;
        harness.wizard.select_expert(Some(IdFixtures::curie_id()));
        harness
    }

    #[tokio::test]
    async fn test_successful_submission_restarts_wizard() {
        let harness = ready_harness().await;
        harness.gateway.next_claim_id(IdFixtures::claim_id()).await;

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(outcome, Ok(Submission::Created(IdFixtures::claim_id())));
        assert_single_notification(&harness.sink, Severity::Success, "Claim created: CLM-42");

        let snapshot = harness.wizard.snapshot();
        assert_eq!(snapshot.step(), Step::ContractLookup);
        assert!(snapshot.contract().is_none());
        // The draft and the expert booking survive until a new session starts
        assert_eq!(
            snapshot.claim_draft().description,
            StringFixtures::incident_description()
        );
        assert_eq!(snapshot.selected_expert_id(), Some(&IdFixtures::curie_id()));
    }

    #[tokio::test]
    async fn test_submission_payload() {
        let harness = ready_harness().await;
        harness
            .wizard
            .update_claim(ClaimField::Priority(Priority::High));

        harness.wizard.submit_claim().await.unwrap();

        let submissions = harness.gateway.submissions().await;
        assert_eq!(submissions.len(), 1);
        let submission = &submissions[0];
        assert_eq!(
            submission.new_claim.contract_id,
            Some(IdFixtures::linked_contract_id())
        );
        assert_eq!(
            submission.new_claim.assigned_expert_id,
            Some(IdFixtures::curie_id())
        );
        assert_eq!(submission.new_claim.priority, Priority::High);
        assert_eq!(submission.expert_id, Some(IdFixtures::curie_id()));
        assert_eq!(submission.appointment_date, Some(DateFixtures::staffed_day()));
        assert_eq!(submission.location_address, StringFixtures::property_address());
    }

    #[tokio::test]
    async fn test_submission_without_expert() {
        let harness = WizardHarness::seeded().await;
        harness
            .walk_to_expert_step(StringFixtures::bare_contract_number())
            .await;

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(outcome, Ok(Submission::Created("CLM-1".parse().unwrap())));
        let submission = &harness.gateway.submissions().await[0];
        assert!(submission.expert_id.is_none());
        assert!(submission.appointment_date.is_none());
        assert_eq!(submission.location_address, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_rejected_submission_changes_nothing() {
        let harness = ready_harness().await;
        harness.gateway.reject_claims("Duplicate claim").await;
        let before = harness.wizard.snapshot();

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(outcome, Ok(Submission::Rejected("Duplicate claim".to_string())));
        assert_single_notification(&harness.sink, Severity::Error, "Duplicate claim");
        assert_eq!(harness.wizard.snapshot(), before);
        assert_eq!(harness.wizard.current_step(), Step::ExpertAssignment);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_as_rejection() {
        let harness = ready_harness().await;
        harness.gateway.fail(GatewayOperation::CreateClaim).await;

        let outcome = harness.wizard.submit_claim().await;

        assert!(matches!(outcome, Ok(Submission::Rejected(_))));
        assert_eq!(harness.sink.last().unwrap().severity, Severity::Error);
        assert!(harness.wizard.snapshot().contract().is_some());
    }

    #[tokio::test]
    async fn test_submission_without_contract_is_refused_locally() {
        let harness = WizardHarness::seeded().await;

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(outcome, Err(WizardError::ContractNotResolved));
        assert_single_notification(
            &harness.sink,
            Severity::Error,
            &WizardError::ContractNotResolved.to_string(),
        );
        assert_eq!(harness.gateway.call_count(GatewayOperation::CreateClaim).await, 0);
    }

    #[tokio::test]
    async fn test_second_submission_after_restart_needs_new_contract() {
        let harness = ready_harness().await;
        harness.wizard.submit_claim().await.unwrap();
        harness.sink.clear();

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(outcome, Err(WizardError::ContractNotResolved));
        assert_eq!(harness.gateway.submissions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_expert_is_refused_locally() {
        let harness = ready_harness().await;
        harness
            .wizard
            .change_appointment_date(Some(DateFixtures::alternate_day()))
            .await;

        let outcome = harness.wizard.submit_claim().await;

        assert_eq!(
            outcome,
            Err(WizardError::StaleExpertSelection { expert_id: IdFixtures::curie_id() })
        );
        assert_eq!(harness.sink.last().unwrap().severity, Severity::Error);
        assert_eq!(harness.gateway.call_count(GatewayOperation::CreateClaim).await, 0);
    }

    #[tokio::test]
    async fn test_start_new_session_discards_everything() {
        let harness = ready_harness().await;
        let session_id = harness.wizard.session_id();

        harness.wizard.start_new_session();

        let snapshot = harness.wizard.snapshot();
        assert_eq!(snapshot.step(), Step::ContractLookup);
        assert!(snapshot.contract_query().is_empty());
        assert_eq!(snapshot.claim_draft(), &ClaimDraft::new());
        assert!(snapshot.expert_options().is_empty());
        assert!(snapshot.selected_expert_id().is_none());
        assert_eq!(harness.wizard.session_id(), session_id);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_normalized_contract_is_always_displayable(record in contract_record_strategy()) {
            let contract = Contract::from_record(record.clone());

            assert_contract_displayable(&contract);
            prop_assert_eq!(&contract.id, &record.id);
            prop_assert_eq!(&contract.number, &record.contract_number);
            if let Some(name) = record.account.and_then(|account| account.name) {
                prop_assert_eq!(contract.account_name, name);
            }
            if let Some(address) = record.property.and_then(|property| property.address) {
                prop_assert_eq!(contract.property_address, address);
            }
        }

        #[test]
        fn test_incident_completeness_follows_last_edits(edits in claim_edits_strategy()) {
            let mut draft = ClaimDraft::new();
            let mut incident_type = None;
            let mut description = String::new();
            for edit in edits {
                match &edit {
                    ClaimField::IncidentType(value) => incident_type = *value,
                    ClaimField::Description(value) => description = value.clone(),
                    _ => {}
                }
                draft.apply(edit);
            }

            prop_assert_eq!(
                draft.is_incident_complete(),
                incident_type.is_some() && !description.is_empty()
            );
        }
    }

    #[test]
    fn test_fixture_contracts_are_displayable() {
        for record in ContractFixtures::all() {
            assert_contract_displayable(&Contract::from_record(record));
        }
        assert_eq!(ExpertFixtures::staffed_day_roster().len(), 2);
    }
}
