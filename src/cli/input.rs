//! Line commands typed during a session

use std::fmt;
use std::str::FromStr;

/// One command read from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Start a capture, or stop the running one (Enter or `r`)
    Record,
    /// Toggle playback of the Nth recording (1-based)
    Play(usize),
    /// Show the recordings again
    List,
    Submit,
    /// Start over after results or an error
    NewSession,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command '{}'. Type 'h' for help.", self.0)
    }
}

impl FromStr for UserCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("").to_lowercase();
        let arg = words.next();
        let unknown = || UnknownCommand(line.to_string());

        if words.next().is_some() {
            return Err(unknown());
        }

        match (head.as_str(), arg) {
            ("" | "r" | "rec" | "record", None) => Ok(Self::Record),
            ("p" | "play", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Self::Play(n)),
                _ => Err(unknown()),
            },
            ("l" | "ls" | "list", None) => Ok(Self::List),
            ("s" | "submit", None) => Ok(Self::Submit),
            ("n" | "new", None) => Ok(Self::NewSession),
            ("h" | "?" | "help", None) => Ok(Self::Help),
            ("q" | "quit" | "exit", None) => Ok(Self::Quit),
            _ => Err(unknown()),
        }
    }
}

pub const HELP_TEXT: &str = "\
  Enter / r    start or stop a capture
  p <N>        play or pause recording N
  l            list recordings
  s            submit the three samples
  n            new session (after results or an error)
  h            this help
  q            quit";
