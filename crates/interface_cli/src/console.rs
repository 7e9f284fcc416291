//! Console rendering
//!
//! Turns notifications and wizard snapshots into the text shown at the
//! prompt, and keeps a background task that logs step transitions.

use std::fmt::Write as _;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use domain_claims::{Notification, NotificationSink, Severity, Step, WizardState};

/// Prints notifications on standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, "Notification shown");
        println!("{}", format_notification(&notification));
    }
}

/// One-line form of a notification, e.g. `[Success] Contract found`
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "+",
        Severity::Error => "!",
        Severity::Warning => "~",
        Severity::Info => "i",
    };
    format!("{marker} [{}] {}", notification.title, notification.message)
}

/// Multi-line summary of the wizard, focused on the current step
pub fn render_state(state: &WizardState) -> String {
    let step = state.step();
    let mut out = format!("Step {}/{}: {}\n", step.number(), Step::ALL.len(), step);

    match step {
        Step::ContractLookup => {
            let _ = writeln!(out, "  Contract number: {}", or_dash(state.contract_query()));
            match state.contract() {
                Some(contract) => {
                    let _ = writeln!(out, "  Contract:  {}", contract.number);
                    let _ = writeln!(out, "  Client:    {}", contract.account_name);
                    let _ = writeln!(
                        out,
                        "  Property:  {} ({})",
                        contract.property_name, contract.property_type
                    );
                    let _ = writeln!(out, "  Address:   {}", contract.property_address);
                    if let (Some(start), Some(end)) = (contract.start_date, contract.end_date) {
                        let _ = writeln!(out, "  Term:      {start} to {end}");
                    }
                }
                None => {
                    let _ = writeln!(out, "  No contract selected");
                }
            }
        }
        Step::IncidentEntry => {
            let draft = state.claim_draft();
            let _ = writeln!(
                out,
                "  Incident date: {}",
                draft
                    .incident_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            let _ = writeln!(
                out,
                "  Type:          {}",
                draft.incident_type.map(|kind| kind.label()).unwrap_or("-")
            );
            let _ = writeln!(out, "  Priority:      {}", draft.priority);
            let _ = writeln!(out, "  Description:   {}", or_dash(&draft.description));
        }
        Step::ExpertAssignment => {
            let _ = writeln!(
                out,
                "  Appointment date: {}",
                state
                    .appointment_date()
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            if state.expert_options().is_empty() {
                let _ = writeln!(out, "  No experts loaded");
            }
            for option in state.expert_options() {
                let marker = if state.selected_expert_id() == Some(&option.id) {
                    "*"
                } else {
                    " "
                };
                let _ = writeln!(out, "  {marker} {}  {}", option.id, option.display_name);
            }
        }
    }

    if !state.can_advance() && step != Step::ExpertAssignment {
        let _ = writeln!(out, "  (complete this step to continue)");
    }
    out.trim_end().to_string()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Logs every step transition until the wizard is dropped
pub fn spawn_step_logger(mut receiver: watch::Receiver<WizardState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = receiver.borrow_and_update().step();
        while receiver.changed().await.is_ok() {
            let step = receiver.borrow_and_update().step();
            if step != last {
                tracing::info!(from = last.number(), to = step.number(), %step, "Wizard step changed");
                last = step;
            }
        }
        tracing::debug!("Step logger stopped");
    })
}
