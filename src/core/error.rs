use std::fmt;

use crate::core::state::Level;
use crate::data::ProviderError;

/// Errors raised while handling a user action.
///
/// None of these are fatal: the session reports them as a footer notice and keeps
/// the navigation state it had before the action.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// Retrieving data for a transition or refresh failed.
    Fetch(ProviderError),
    /// The filter pattern does not compile as a regular expression.
    InvalidFilterPattern { pattern: String, reason: String },
    /// The command bar text started with a verb nobody handles.
    UnknownCommand(String),
    /// A known verb was given without its required argument.
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },
    /// Filters only apply to a board catalog.
    FilterUnavailable,
    /// A known verb whose transition the current level does not allow,
    /// e.g. `board v` while already inside a board.
    NotAvailableHere { verb: String, level: Level },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Fetch(e) => write!(f, "fetch failed: {e}"),
            NavError::InvalidFilterPattern { pattern, reason } => {
                write!(f, "invalid filter '{pattern}': {reason}")
            }
            NavError::UnknownCommand(verb) => write!(f, "unknown command: {verb}"),
            NavError::MissingArgument { verb, expected } => {
                write!(f, "usage: {verb} <{expected}>")
            }
            NavError::FilterUnavailable => write!(f, "filters only apply inside a board"),
            NavError::NotAvailableHere { verb, level } => {
                let place = match level {
                    Level::Index => "the board index",
                    Level::Board => "a board",
                    Level::Thread => "a thread",
                };
                write!(f, "{verb}: not available in {place}")
            }
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for NavError {
    fn from(e: ProviderError) -> Self {
        NavError::Fetch(e)
    }
}
