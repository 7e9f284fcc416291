//! Claim Wizard Console
//!
//! Line-oriented front end for the claim intake wizard. The binary reads one
//! command per line, runs it against a [`ClaimWizard`](domain_claims::ClaimWizard)
//! wired to the HTTP gateway, and prints notifications and state summaries.
//!
//! # Example
//!
//! ```rust,ignore
//! let command = interface_cli::command::parse("search C-100")?;
//! match interface_cli::session::execute(&wizard, command).await? {
//!     Reply::Text(text) => println!("{text}"),
//!     Reply::Silent => {}
//!     Reply::Quit => return Ok(()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod command;
pub mod console;
pub mod session;

pub use config::{CliConfig, LogFormat};
pub use error::CliError;
pub use command::{parse, Command};
pub use console::{format_notification, render_state, spawn_step_logger, ConsoleNotificationSink};
pub use session::{execute, Reply};
