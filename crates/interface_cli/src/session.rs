//! Command execution against a wizard session

use std::fmt::Write as _;

use domain_claims::{ClaimField, ClaimWizard, ContractLookup, ExpertQuery, Submission};

use crate::command::{Command, HELP};
use crate::console::render_state;
use crate::error::CliError;

/// What the prompt should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print beyond notifications
    Silent,
    /// Text to print
    Text(String),
    /// Leave the prompt
    Quit,
}

/// Runs one command against the wizard
///
/// Remote outcomes are already reported through the wizard's notification
/// sink, so they only add text when there is something to list.
///
/// # Errors
///
/// Returns `CliError::Wizard` when navigation is blocked by an incomplete step
pub async fn execute(wizard: &ClaimWizard, command: Command) -> Result<Reply, CliError> {
    let reply = match command {
        Command::Search(number) => {
            wizard.set_contract_query(number);
            match wizard.search_contract().await {
                ContractLookup::Found(_) => Reply::Text(render_state(&wizard.snapshot())),
                ContractLookup::NotFound
                | ContractLookup::Failed(_)
                | ContractLookup::Superseded => Reply::Silent,
            }
        }
        Command::IncidentDate(date) => edit(wizard, ClaimField::IncidentDate(date)),
        Command::IncidentType(kind) => edit(wizard, ClaimField::IncidentType(kind)),
        Command::Priority(priority) => edit(wizard, ClaimField::Priority(priority)),
        Command::Description(text) => edit(wizard, ClaimField::Description(text)),
        Command::AppointmentDate(date) => match wizard.change_appointment_date(date).await {
            ExpertQuery::Loaded(count) if count > 0 => Reply::Text(expert_list(wizard)),
            ExpertQuery::Loaded(_)
            | ExpertQuery::Cleared
            | ExpertQuery::Superseded
            | ExpertQuery::Failed(_) => Reply::Silent,
        },
        Command::Expert(expert_id) => {
            wizard.select_expert(expert_id);
            Reply::Text(render_state(&wizard.snapshot()))
        }
        Command::Next => {
            wizard.next_step()?;
            Reply::Text(render_state(&wizard.snapshot()))
        }
        Command::Back => {
            wizard.previous_step();
            Reply::Text(render_state(&wizard.snapshot()))
        }
        Command::Submit => match wizard.submit_claim().await {
            Ok(Submission::Created(_)) => Reply::Text(render_state(&wizard.snapshot())),
            Ok(Submission::Rejected(_)) => Reply::Silent,
            Err(error) => {
                // already shown by the notification sink
                tracing::debug!(%error, "Submission refused");
                Reply::Silent
            }
        },
        Command::Reset => {
            wizard.start_new_session();
            Reply::Text(render_state(&wizard.snapshot()))
        }
        Command::Show => Reply::Text(render_state(&wizard.snapshot())),
        Command::Help => Reply::Text(HELP.to_string()),
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}

fn edit(wizard: &ClaimWizard, field: ClaimField) -> Reply {
    wizard.update_claim(field);
    Reply::Silent
}

fn expert_list(wizard: &ClaimWizard) -> String {
    let state = wizard.snapshot();
    let mut out = String::from("Available experts:");
    for option in state.expert_options() {
        let _ = write!(out, "\n  {}  {}", option.id, option.display_name);
    }
    out
}
