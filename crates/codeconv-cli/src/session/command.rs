//! Parsing of interactive session command lines.

use std::path::PathBuf;

use codeconv_core::PanelKind;
use thiserror::Error;

/// Lines shown by `logs show` without a count.
pub const DEFAULT_SHOW_LINES: usize = 50;

pub const HELP: &str = "\
Commands:
  convert <file> <start> <end>   Convert lines start..=end of file
  make-vo                        Generate value objects for the project
  set project <path>             Project analysed by make-vo
  set output <path>              Output directory for generated VO files
  set vo <path>                  Existing VO directory sent with conversions
  set server <path>              Backend entry point (default: search workspace)
  set log <path>                 Backend log file to watch
  server start [path]            Start the backend
  server stop                    Stop the backend
  server restart                 Restart the backend
  server status                  Show the backend state
  logs watch [path]              Tail the log file
  logs unwatch                   Stop tailing
  logs show [n]                  Print the last n captured lines (default 50)
  logs clear                     Drop captured lines
  logs follow | logs mute        Print captured lines live, or stop doing so
  refresh vo | refresh converter Re-render a panel
  panels                         Render both panels
  help                           Show this help
  quit | exit                    Leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Convert { file: PathBuf, start: u32, end: u32 },
    MakeVo,
    Set { target: SetTarget, path: PathBuf },
    Server(ServerAction),
    Logs(LogsAction),
    Refresh(PanelKind),
    Panels,
    Help,
    Quit,
    /// A blank line.
    Empty,
}

/// Which path `set` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetTarget {
    Project,
    Output,
    Vo,
    Server,
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAction {
    Start(Option<PathBuf>),
    Stop,
    Restart,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogsAction {
    Watch(Option<PathBuf>),
    Unwatch,
    Show(usize),
    Clear,
    Follow,
    Mute,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

/// Parse one session line.
///
/// Paths are the remainder of the line, so they may contain spaces.
pub fn parse(line: &str) -> Result<SessionCommand, ParseError> {
    let line = line.trim();
    let (word, rest) = split_word(line);

    match word {
        "" => Ok(SessionCommand::Empty),
        "convert" => parse_convert(rest),
        "make-vo" => Ok(SessionCommand::MakeVo),
        "set" => parse_set(rest),
        "server" => parse_server(rest),
        "logs" => parse_logs(rest),
        "refresh" => match rest {
            "vo" => Ok(SessionCommand::Refresh(PanelKind::VoGenerator)),
            "converter" => Ok(SessionCommand::Refresh(PanelKind::CodeConverter)),
            _ => Err(ParseError::Usage("refresh vo|converter")),
        },
        "panels" => Ok(SessionCommand::Panels),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    s.split_once(char::is_whitespace)
        .map_or((s, ""), |(word, rest)| (word, rest.trim()))
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))
}

fn parse_convert(rest: &str) -> Result<SessionCommand, ParseError> {
    const USAGE: &str = "convert <file> <start> <end>";
    let (head, end) = rest.rsplit_once(char::is_whitespace).ok_or(ParseError::Usage(USAGE))?;
    let (file, start) = head
        .trim_end()
        .rsplit_once(char::is_whitespace)
        .ok_or(ParseError::Usage(USAGE))?;
    let file = file.trim();
    if file.is_empty() {
        return Err(ParseError::Usage(USAGE));
    }
    Ok(SessionCommand::Convert {
        file: PathBuf::from(file),
        start: number(start)?,
        end: number(end)?,
    })
}

fn parse_set(rest: &str) -> Result<SessionCommand, ParseError> {
    const USAGE: &str = "set project|output|vo|server|log <path>";
    let (which, path) = split_word(rest);
    let target = match which {
        "project" => SetTarget::Project,
        "output" => SetTarget::Output,
        "vo" => SetTarget::Vo,
        "server" => SetTarget::Server,
        "log" => SetTarget::Log,
        _ => return Err(ParseError::Usage(USAGE)),
    };
    let path = optional_path(path).ok_or(ParseError::Usage(USAGE))?;
    Ok(SessionCommand::Set { target, path })
}

fn parse_server(rest: &str) -> Result<SessionCommand, ParseError> {
    let (action, arg) = split_word(rest);
    let action = match (action, arg.is_empty()) {
        ("start", _) => ServerAction::Start(optional_path(arg)),
        ("stop", true) => ServerAction::Stop,
        ("restart", true) => ServerAction::Restart,
        ("status", true) => ServerAction::Status,
        _ => return Err(ParseError::Usage("server start [path]|stop|restart|status")),
    };
    Ok(SessionCommand::Server(action))
}

fn parse_logs(rest: &str) -> Result<SessionCommand, ParseError> {
    let (action, arg) = split_word(rest);
    let action = match (action, arg.is_empty()) {
        ("watch", _) => LogsAction::Watch(optional_path(arg)),
        ("unwatch", true) => LogsAction::Unwatch,
        ("show", true) => LogsAction::Show(DEFAULT_SHOW_LINES),
        ("show", false) => LogsAction::Show(number(arg)?),
        ("clear", true) => LogsAction::Clear,
        ("follow", true) => LogsAction::Follow,
        ("mute", true) => LogsAction::Mute,
        _ => {
            return Err(ParseError::Usage(
                "logs watch [path]|unwatch|show [n]|clear|follow|mute",
            ));
        }
    };
    Ok(SessionCommand::Logs(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_accepts_paths_with_spaces() {
        assert_eq!(
            parse("convert  src/My Dao.java 12 40 ").unwrap(),
            SessionCommand::Convert {
                file: PathBuf::from("src/My Dao.java"),
                start: 12,
                end: 40,
            }
        );
    }

    #[test]
    fn test_convert_errors() {
        assert_eq!(
            parse("convert Dao.java 12").unwrap_err(),
            ParseError::Usage("convert <file> <start> <end>")
        );
        assert_eq!(
            parse("convert Dao.java one 2").unwrap_err(),
            ParseError::InvalidNumber("one".to_string())
        );
    }

    #[test]
    fn test_set_targets() {
        assert_eq!(
            parse("set output /tmp/out dir").unwrap(),
            SessionCommand::Set {
                target: SetTarget::Output,
                path: PathBuf::from("/tmp/out dir"),
            }
        );
        assert!(matches!(parse("set vo"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("set colour red"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_server_and_logs_actions() {
        assert_eq!(
            parse("server start").unwrap(),
            SessionCommand::Server(ServerAction::Start(None))
        );
        assert_eq!(
            parse("server start backend/server.py").unwrap(),
            SessionCommand::Server(ServerAction::Start(Some(PathBuf::from("backend/server.py"))))
        );
        assert!(parse("server stop now").is_err());
        assert_eq!(
            parse("logs show").unwrap(),
            SessionCommand::Logs(LogsAction::Show(DEFAULT_SHOW_LINES))
        );
        assert_eq!(parse("logs show 5").unwrap(), SessionCommand::Logs(LogsAction::Show(5)));
        assert_eq!(parse("logs unwatch").unwrap(), SessionCommand::Logs(LogsAction::Unwatch));
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse("   ").unwrap(), SessionCommand::Empty);
        assert_eq!(parse("exit").unwrap(), SessionCommand::Quit);
        assert_eq!(
            parse("refresh converter").unwrap(),
            SessionCommand::Refresh(PanelKind::CodeConverter)
        );
        assert_eq!(
            parse("launch").unwrap_err(),
            ParseError::Unknown("launch".to_string())
        );
    }
}
