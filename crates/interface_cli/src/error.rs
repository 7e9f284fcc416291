//! Console error handling

use thiserror::Error;

use core_kernel::CoreError;
use domain_claims::WizardError;

/// Errors shown to the operator at the prompt
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command `{0}`; type `help` for the list of commands")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    pub fn missing(command: &'static str, expected: &'static str) -> Self {
        CliError::MissingArgument { command, expected }
    }
}
