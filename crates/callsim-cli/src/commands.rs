//! Interactive console commands.
//!
//! The console front end reads one line at a time and parses it into a
//! [`ReplCommand`]. Parsing is pure; dispatch lives in [`crate::repl`].

use std::str::FromStr;

use callsim_core::Gender;
use callsim_core::domain::UnknownGender;
use thiserror::Error;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// List the scenarios offered by the backend.
    Scenarios,
    /// Pick a scenario by id.
    Scenario(String),
    /// Switch the caller gender.
    Gender(Gender),
    /// List the voices for the current gender.
    Voices,
    /// Pick a voice by id.
    Voice(String),
    /// Refetch `/options`.
    Reload,
    /// Launch the caller.
    Load,
    /// Press the call button (start or end the call).
    Call,
    /// Stop the caller or cancel the launch in progress.
    Stop,
    /// Print the latest backend log text.
    Logs,
    /// Print the phone panel and current selection.
    Status,
    Help,
    Quit,
}

/// Why a console line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Gender(#[from] UnknownGender),
}

impl FromStr for ReplCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(CommandError::Usage(usage(name)));
        }

        let command = match (name.to_ascii_lowercase().as_str(), argument) {
            ("scenarios", None) => Self::Scenarios,
            ("scenario", Some(id)) => Self::Scenario(id.to_string()),
            ("gender", Some(gender)) => Self::Gender(gender.parse()?),
            ("voices", None) => Self::Voices,
            ("voice", Some(id)) => Self::Voice(id.to_string()),
            ("reload", None) => Self::Reload,
            ("load" | "launch", None) => Self::Load,
            ("call", None) => Self::Call,
            ("stop" | "cancel", None) => Self::Stop,
            ("logs", None) => Self::Logs,
            ("status", None) => Self::Status,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            (other, _) if is_known(other) => return Err(CommandError::Usage(usage(other))),
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

const COMMANDS: &[(&str, &str, &str)] = &[
    ("scenarios", "scenarios", "List available scenarios"),
    ("scenario", "scenario <id>", "Select a scenario"),
    ("gender", "gender <female|male>", "Switch the caller gender"),
    ("voices", "voices", "List voices for the current gender"),
    ("voice", "voice <id>", "Select a voice"),
    ("reload", "reload", "Reload options from the backend"),
    ("load", "load", "Load the caller"),
    ("call", "call", "Start or end the call"),
    ("stop", "stop", "Stop the caller or cancel loading"),
    ("logs", "logs", "Show the latest backend logs"),
    ("status", "status", "Show the phone and current selection"),
    ("help", "help", "Show this help"),
    ("quit", "quit", "Stop the caller and exit"),
];

fn is_known(name: &str) -> bool {
    COMMANDS.iter().any(|(n, _, _)| *n == name)
}

fn usage(name: &str) -> &'static str {
    let name = name.to_ascii_lowercase();
    COMMANDS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map_or("help", |(_, usage, _)| *usage)
}

/// Help text listing every command.
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|(_, u, _)| u.len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|(_, usage, about)| format!("  {usage:<width$}  {about}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("scenarios".parse::<ReplCommand>(), Ok(ReplCommand::Scenarios));
        assert_eq!("  LOAD  ".parse::<ReplCommand>(), Ok(ReplCommand::Load));
        assert_eq!("cancel".parse::<ReplCommand>(), Ok(ReplCommand::Stop));
        assert_eq!("exit".parse::<ReplCommand>(), Ok(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_commands_with_argument() {
        assert_eq!(
            "scenario s1".parse::<ReplCommand>(),
            Ok(ReplCommand::Scenario("s1".to_string()))
        );
        assert_eq!("voice v1".parse::<ReplCommand>(), Ok(ReplCommand::Voice("v1".to_string())));
        assert_eq!("gender Male".parse::<ReplCommand>(), Ok(ReplCommand::Gender(Gender::Male)));
    }

    #[test]
    fn test_missing_or_extra_argument_reports_usage() {
        assert_eq!(
            "scenario".parse::<ReplCommand>(),
            Err(CommandError::Usage("scenario <id>"))
        );
        assert_eq!(
            "load now".parse::<ReplCommand>(),
            Err(CommandError::Usage("load"))
        );
    }

    #[test]
    fn test_unknown_command_and_gender() {
        assert_eq!(
            "dial".parse::<ReplCommand>(),
            Err(CommandError::Unknown("dial".to_string()))
        );
        assert!(matches!(
            "gender robot".parse::<ReplCommand>(),
            Err(CommandError::Gender(_))
        ));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for (name, _, _) in COMMANDS {
            assert!(help.contains(name), "missing {name}");
        }
    }
}
