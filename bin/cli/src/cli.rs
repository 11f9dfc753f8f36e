//! Command-line arguments.

use clap::Parser;
use krx_chat_core::Language;

const EXAMPLES: &str = "\
Examples:
  krx-chat \"오늘 모멘텀 종목은?\"     Single question
  krx-chat                            Interactive mode
  krx-chat --new \"새 대화 시작\"      New conversation
  krx-chat --history                  Show history

Environment:
  KRX_API_BASE      API server URL (default: http://localhost:8000)
  KRX_TIMEOUT_SECS  Per-request time limit (default: 60)
  KRX_LANGUAGE      Reply language, ko or en (default: ko)
  KRX_STORE_PATH    File holding the conversation id
  KRX_RESUME        Resume the stored conversation in interactive mode
  RUST_LOG          Log filter written to stderr (default: warn)";

/// Terminal chat with the KRX sector rotation assistant.
#[derive(Debug, Parser)]
#[command(name = "krx-chat", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Question to ask (omit for interactive mode)
    pub question: Option<String>,

    /// Start a new conversation
    #[arg(short, long)]
    pub new: bool,

    /// Show the stored conversation
    #[arg(short = 'H', long)]
    pub history: bool,

    /// Forget the stored conversation
    #[arg(short, long)]
    pub clear: bool,

    /// Check the assistant service health
    #[arg(long)]
    pub health: bool,

    /// API base URL
    #[arg(long, env = "KRX_API_BASE")]
    pub api: Option<String>,

    /// Reply language (ko or en)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Resume the stored conversation in interactive mode
    #[arg(long)]
    pub resume: bool,
}
