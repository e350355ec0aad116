//! Parsing of inbound chat commands.

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `unlock <secret>`. `None` when no secret was supplied.
    Unlock(Option<String>),
    /// `status`.
    Status,
    /// `help`.
    Help,
}

impl Command {
    /// Parses `content` using `prefix`.
    ///
    /// Returns `None` for anything that is not a known command, including
    /// words that merely start with a command name (`!unlocked`). Only the
    /// first whitespace separated token after `unlock` is taken as the secret.
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let mut words = content.trim().split_whitespace();
        let name = words.next()?.strip_prefix(prefix)?;

        match name {
            "unlock" => Some(Command::Unlock(words.next().map(str::to_string))),
            "status" if words.next().is_none() => Some(Command::Status),
            "help" if words.next().is_none() => Some(Command::Help),
            _ => None,
        }
    }

    /// The command name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Unlock(_) => "unlock",
            Command::Status => "status",
            Command::Help => "help",
        }
    }
}
