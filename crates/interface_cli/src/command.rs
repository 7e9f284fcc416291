//! Line commands understood by the console

use chrono::NaiveDate;

use core_kernel::ExpertId;
use domain_claims::{IncidentType, Priority, WizardError};

use crate::error::CliError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLEAR: &str = "clear";

/// Text printed by the `help` command
pub const HELP: &str = "\
Commands:
  search [number]                 look a contract up by its number
  incident-date <YYYY-MM-DD|clear> set the date of the incident
  type <label|clear>              set the incident type (e.g. water-damage, fire)
  priority <low|medium|high>      set the claim priority
  description <text>              set the incident description
  date <YYYY-MM-DD|clear>         set the appointment date and load experts
  expert <id|none>                select an expert from the loaded list
  next                            go to the next step
  back                            go to the previous step
  submit                          create the claim
  reset                           discard everything and start over
  show                            print the current state
  help                            print this text
  quit                            leave";

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    IncidentDate(Option<NaiveDate>),
    IncidentType(Option<IncidentType>),
    Priority(Priority),
    Description(String),
    AppointmentDate(Option<NaiveDate>),
    Expert(Option<ExpertId>),
    Next,
    Back,
    Submit,
    Reset,
    Show,
    Help,
    Quit,
}

/// Parses one input line
///
/// The first word selects the command, case-insensitively; the remainder of
/// the line, trimmed, is its argument.
///
/// # Errors
///
/// Returns `CliError::UnknownCommand` for an unrecognized keyword,
/// `CliError::MissingArgument` when a required argument is absent and
/// `CliError::Wizard` when the argument cannot be read.
pub fn parse(line: &str) -> Result<Command, CliError> {
    let line = line.trim();
    let (keyword, argument) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        // an empty query still goes to the back office
        "search" => Command::Search(argument.to_string()),
        "incident-date" => Command::IncidentDate(optional_date(
            required(argument, "incident-date", "a date or `clear`")?,
            "incident date",
        )?),
        "type" => {
            let label = required(argument, "type", "an incident type or `clear`")?;
            if label.eq_ignore_ascii_case(CLEAR) {
                Command::IncidentType(None)
            } else {
                Command::IncidentType(Some(label.parse()?))
            }
        }
        "priority" => Command::Priority(required(argument, "priority", "low, medium or high")?.parse()?),
        "description" => Command::Description(argument.to_string()),
        "date" => Command::AppointmentDate(optional_date(
            required(argument, "date", "a date or `clear`")?,
            "appointment date",
        )?),
        "expert" => {
            let id = required(argument, "expert", "an expert id or `none`")?;
            if id.eq_ignore_ascii_case("none") {
                Command::Expert(None)
            } else {
                Command::Expert(Some(ExpertId::new(id)?))
            }
        }
        "next" => Command::Next,
        "back" => Command::Back,
        "submit" => Command::Submit,
        "reset" => Command::Reset,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CliError::UnknownCommand(keyword.to_string())),
    };
    Ok(command)
}

fn required<'a>(
    argument: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CliError> {
    if argument.is_empty() {
        Err(CliError::missing(command, expected))
    } else {
        Ok(argument)
    }
}

fn optional_date(argument: &str, field: &'static str) -> Result<Option<NaiveDate>, CliError> {
    if argument.eq_ignore_ascii_case(CLEAR) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(argument, DATE_FORMAT)
        .map(Some)
        .map_err(|_| WizardError::invalid_field(field, argument).into())
}
