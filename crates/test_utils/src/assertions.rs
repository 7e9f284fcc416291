//! Custom Test Assertions
//!
//! Assertion helpers for wizard types that give more meaningful failure
//! messages than plain `assert_eq!`.

use domain_claims::{Contract, Notification, RecordingNotificationSink, Severity};

/// Asserts that exactly one notification was received and that it matches
///
/// # Panics
///
/// Panics if the sink holds zero or several notifications, or if the single
/// notification has a different severity or message
pub fn assert_single_notification(
    sink: &RecordingNotificationSink,
    severity: Severity,
    message: &str,
) {
    let received = sink.notifications();
    assert_eq!(
        received.len(),
        1,
        "Expected exactly one notification, got {:?}",
        received
    );
    assert_notification(&received[0], severity, message);
}

/// Asserts that the most recent notification matches
pub fn assert_last_notification(
    sink: &RecordingNotificationSink,
    severity: Severity,
    message: &str,
) {
    let last = sink
        .last()
        .unwrap_or_else(|| panic!("Expected a {severity} notification {message:?}, got none"));
    assert_notification(&last, severity, message);
}

/// Asserts that nothing was notified
pub fn assert_no_notifications(sink: &RecordingNotificationSink) {
    let received = sink.notifications();
    assert!(
        received.is_empty(),
        "Expected no notifications, got {:?}",
        received
    );
}

fn assert_notification(notification: &Notification, severity: Severity, message: &str) {
    assert_eq!(
        notification.severity, severity,
        "Severity mismatch for notification {:?}",
        notification
    );
    assert_eq!(
        notification.message, message,
        "Message mismatch for notification {:?}",
        notification
    );
}

/// Asserts that every display field of a contract is populated
pub fn assert_contract_displayable(contract: &Contract) {
    for (field, value) in [
        ("account_name", &contract.account_name),
        ("property_name", &contract.property_name),
        ("property_type", &contract.property_type),
        ("property_address", &contract.property_address),
    ] {
        assert!(
            !value.is_empty(),
            "Contract {} has an empty {}",
            contract.number,
            field
        );
    }
}
