//! Interactive-mode input parsing.

use krx_chat_core::Language;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// Text to send to the assistant.
    Send(String),
    /// `/new`
    New,
    /// `/history`
    History,
    /// `/clear`
    Clear,
    /// `/conversations`
    Conversations,
    /// `/lang <code>`
    Lang(Language),
    /// `/help`
    Help,
    /// `/quit`, `/exit` or `/q`
    Quit,
    /// A slash command that could not be understood.
    Invalid { message: String },
}

impl Command {
    /// Parses one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Send(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let argument = parts.next();

        match name.as_str() {
            "new" => Self::New,
            "history" => Self::History,
            "clear" => Self::Clear,
            "conversations" | "list" => Self::Conversations,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "lang" => match argument.map(str::parse::<Language>) {
                Some(Ok(language)) => Self::Lang(language),
                Some(Err(e)) => Self::Invalid {
                    message: e.to_string(),
                },
                None => Self::Invalid {
                    message: "usage: /lang <ko|en>".to_string(),
                },
            },
            _ => Self::Invalid {
                message: format!("unknown command: {line}"),
            },
        }
    }
}

/// Help text for interactive mode.
pub const HELP: &str = "\
Commands:
  /new            Start a new conversation
  /history        Show the current conversation
  /clear          Forget the current conversation
  /conversations  List recent conversations
  /lang <ko|en>   Switch reply language
  /help           Show this help
  /quit           Exit chat";
