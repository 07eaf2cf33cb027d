//! # Command Bar Commands
//!
//! Text typed in Insert mode is parsed into a `Command` and mapped to exactly one
//! `Action` through a static verb table. Parsing and dispatch never touch state;
//! the reducer applies the resulting action.
//!
//! ```text
//! "filter rust|go"  →  Command { verb: "filter", args: ["rust|go"] }  →  Action::SetFilter(Some("rust|go"))
//! ```

use crate::core::action::Action;
use crate::core::boards::normalize_board_id;
use crate::core::error::NavError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub args: Vec<String>,
}

impl Command {
    /// Splits a line on whitespace. Returns `None` for a blank line.
    pub fn parse(raw: &str) -> Option<Command> {
        let mut tokens = raw.split_whitespace();
        let verb = tokens.next()?.to_lowercase();
        Some(Command {
            verb,
            args: tokens.map(str::to_string).collect(),
        })
    }
}

type Handler = fn(&[String]) -> Result<Action, NavError>;

const COMMANDS: &[(&str, Handler)] = &[
    ("board", board),
    ("thread", thread),
    ("filter", filter),
    ("clearfilter", clear_filter),
    ("refresh", refresh),
    ("back", back),
    ("quit", quit),
];

/// Maps a parsed command to the action it requests.
pub fn dispatch(command: &Command) -> Result<Action, NavError> {
    COMMANDS
        .iter()
        .find(|(verb, _)| *verb == command.verb)
        .map(|(_, handler)| handler(&command.args))
        .unwrap_or_else(|| Err(NavError::UnknownCommand(command.verb.clone())))
}

/// Verbs the command bar understands, in table order.
pub fn verbs() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(verb, _)| *verb)
}

fn board(args: &[String]) -> Result<Action, NavError> {
    let id = args
        .first()
        .map(|a| normalize_board_id(a))
        .filter(|id| !id.is_empty())
        .ok_or(NavError::MissingArgument {
            verb: "board",
            expected: "id",
        })?;
    Ok(Action::SelectBoard(id))
}

fn thread(args: &[String]) -> Result<Action, NavError> {
    let id = args.first().ok_or(NavError::MissingArgument {
        verb: "thread",
        expected: "id",
    })?;
    Ok(Action::SelectThread(id.clone()))
}

fn filter(args: &[String]) -> Result<Action, NavError> {
    if args.is_empty() {
        return Err(NavError::MissingArgument {
            verb: "filter",
            expected: "pattern",
        });
    }
    // Whitespace inside a pattern collapses to single spaces
    Ok(Action::SetFilter(Some(args.join(" "))))
}

fn clear_filter(_: &[String]) -> Result<Action, NavError> {
    Ok(Action::SetFilter(None))
}

fn refresh(_: &[String]) -> Result<Action, NavError> {
    Ok(Action::Refresh)
}

fn back(_: &[String]) -> Result<Action, NavError> {
    Ok(Action::Back)
}

fn quit(_: &[String]) -> Result<Action, NavError> {
    Ok(Action::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> Result<Action, NavError> {
        dispatch(&Command::parse(line).unwrap())
    }

    #[test]
    fn test_parse_splits_verb_and_args() {
        let cmd = Command::parse("  board   g  ").unwrap();
        assert_eq!(cmd.verb, "board");
        assert_eq!(cmd.args, vec!["g"]);
    }

    #[test]
    fn test_parse_blank_line() {
        assert!(Command::parse("").is_none());
        assert!(Command::parse("   \t ").is_none());
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert_eq!(run("BOARD g"), Ok(Action::SelectBoard("g".to_string())));
    }

    #[test]
    fn test_board_normalizes_slashes() {
        assert_eq!(run("board /tv/"), Ok(Action::SelectBoard("tv".to_string())));
    }

    #[test]
    fn test_board_without_id() {
        assert_eq!(
            run("board"),
            Err(NavError::MissingArgument {
                verb: "board",
                expected: "id"
            })
        );
        assert!(run("board //").is_err());
    }

    #[test]
    fn test_thread() {
        assert_eq!(run("thread 12345"), Ok(Action::SelectThread("12345".to_string())));
        assert!(run("thread").is_err());
    }

    #[test]
    fn test_filter_joins_args() {
        assert_eq!(
            run("filter rust   lang"),
            Ok(Action::SetFilter(Some("rust lang".to_string())))
        );
        assert!(run("filter").is_err());
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(run("clearfilter"), Ok(Action::SetFilter(None)));
        assert_eq!(run("refresh"), Ok(Action::Refresh));
        assert_eq!(run("back"), Ok(Action::Back));
        assert_eq!(run("quit"), Ok(Action::Quit));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            run("watch 123"),
            Err(NavError::UnknownCommand("watch".to_string()))
        );
    }

    #[test]
    fn test_verbs_listing() {
        let all: Vec<_> = verbs().collect();
        assert!(all.contains(&"board"));
        assert!(all.contains(&"quit"));
        assert_eq!(all.len(), COMMANDS.len());
    }
}
