//! Run modes of the terminal front-end.

use crate::cli::Cli;
use crate::commands::{Command, HELP};
use crate::config::ChatConfig;
use crate::error::CliError;
use crate::terminal::{TerminalView, format_message, format_summary};
use colored::Colorize;
use krx_chat_client::{ChatBackend, ChatClient};
use krx_chat_session::{
    BootPolicy, ChatSession, ConversationStore, HistoryOutcome, Message, SendOutcome,
};
use rootcause::prelude::{Report, ResultExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing::{debug, info};

const LIST_LIMIT: u32 = 20;

/// Runs the mode selected by `cli`.
///
/// # Errors
///
/// Returns an error if the client cannot be built, a maintenance request
/// fails, or the line editor breaks.
pub async fn run(cli: Cli, config: ChatConfig) -> Result<(), Report<CliError>> {
    let client = ChatClient::new(config.client_config()).context(CliError::Startup)?;
    let store = config.store();
    info!(api_base = %client.base_url(), language = %config.language, "krx-chat starting");

    if cli.clear {
        store.clear();
        println!("{}", "Conversation cleared.".green());
        return Ok(());
    }
    if cli.health {
        return health(&client).await;
    }
    if cli.history {
        return history(&client, store.as_ref()).await;
    }

    match cli.question {
        Some(question) => {
            single_question(Arc::new(client), store, &config, &question, cli.new).await
        }
        None => interactive(client, store, &config).await,
    }
}

async fn health(client: &ChatClient) -> Result<(), Report<CliError>> {
    let status = client
        .health()
        .await
        .context(CliError::Request { operation: "health" })?;

    let state = if status.is_healthy() {
        status.status.green()
    } else {
        status.status.red()
    };
    println!("status:          {state}");
    println!("model:           {}", status.model.as_deref().unwrap_or("-"));
    println!("api key:         {}", yes_no(status.openrouter_configured));
    println!("qa document:     {}", yes_no(status.qa_document_loaded));
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "configured" } else { "missing" }
}

async fn history(
    backend: &dyn ChatBackend,
    store: &dyn ConversationStore,
) -> Result<(), Report<CliError>> {
    let Some(id) = store.read() else {
        println!("{}", "No active conversation. Start one first.".yellow());
        return Ok(());
    };

    match backend.fetch_history(&id).await {
        Ok(history) if history.messages.is_empty() => {
            println!("{}", "No conversation history found.".yellow());
        }
        Ok(history) => {
            println!("{} {}\n", "Conversation".bold(), id.short());
            for message in history.messages {
                println!("{}\n", format_message(&Message::from(message).render()));
            }
        }
        Err(e) if e.is_not_found() => {
            store.clear();
            println!("{}", "Stored conversation no longer exists.".yellow());
        }
        Err(e) => {
            return Err(e).context(CliError::Request {
                operation: "history",
            });
        }
    }
    Ok(())
}

async fn single_question(
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn ConversationStore>,
    config: &ChatConfig,
    question: &str,
    new: bool,
) -> Result<(), Report<CliError>> {
    let session = ChatSession::new(
        backend,
        store,
        Arc::new(TerminalView::single_question()),
        config.language,
    );
    let policy = if new { BootPolicy::Fresh } else { BootPolicy::Resume };
    if let Some(outcome) = session.boot(policy).await {
        debug!(?outcome, "stored conversation checked");
    }

    // The view has already printed the failure notice.
    if let SendOutcome::Failed(e) = session.send_message(question).await {
        debug!(error = %e, "question failed");
    }
    Ok(())
}

async fn interactive(
    client: ChatClient,
    store: Arc<dyn ConversationStore>,
    config: &ChatConfig,
) -> Result<(), Report<CliError>> {
    let session = ChatSession::new(
        Arc::new(client.clone()),
        store,
        Arc::new(TerminalView::interactive()),
        config.language,
    );

    session.open();
    println!("{}\n", HELP.dimmed());

    let policy = if config.resume {
        BootPolicy::Resume
    } else {
        BootPolicy::Fresh
    };
    match session.boot(policy).await {
        Some(HistoryOutcome::Restored { .. }) => {
            if let Some(id) = session.conversation_id() {
                println!("{}", format!("Resuming conversation: {}...", id.short()).cyan());
            }
        }
        Some(outcome) => {
            if let Some(notice) = history_notice(&outcome) {
                println!("{}", notice.yellow());
            }
        }
        None => {}
    }

    let mut editor = DefaultEditor::new().map_err(|e| CliError::Terminal {
        reason: e.to_string(),
    })?;
    let prompt = format!("{} ", "You ›".blue().bold());

    loop {
        let line = tokio::task::block_in_place(|| editor.readline(&prompt));
        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Use /quit to exit.".cyan());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            Err(e) => {
                return Err(CliError::Terminal {
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let command = Command::parse(&line);
        if command != Command::Empty {
            let _ = editor.add_history_entry(line.trim());
        }

        match command {
            Command::Empty => {}
            Command::Send(text) => {
                session.send_message(&text).await;
            }
            Command::New => {
                session.new_conversation();
                println!("{}", "New conversation started.".green());
            }
            Command::Clear => {
                session.new_conversation();
                println!("{}", "Conversation cleared.".green());
            }
            Command::History => match session.conversation_id() {
                Some(id) => {
                    if let Some(notice) = history_notice(&session.load_history(&id).await) {
                        println!("{}", notice.yellow());
                    }
                }
                None => println!("{}", "No active conversation.".yellow()),
            },
            Command::Conversations => list_conversations(&client).await,
            Command::Lang(language) => session.set_language(language),
            Command::Help => println!("{}", HELP.dimmed()),
            Command::Quit => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            Command::Invalid { message } => println!("{}", message.yellow()),
        }
    }
    Ok(())
}

/// Line to show after a history reload, if the conversation was lost.
fn history_notice(outcome: &HistoryOutcome) -> Option<&'static str> {
    match outcome {
        HistoryOutcome::NotFound => Some("Stored conversation no longer exists."),
        HistoryOutcome::Failed(_) => {
            Some("Conversation history could not be loaded; starting fresh.")
        }
        HistoryOutcome::Restored { .. }
        | HistoryOutcome::Skipped
        | HistoryOutcome::Superseded => None,
    }
}

async fn list_conversations(client: &ChatClient) {
    match client.list_conversations(LIST_LIMIT).await {
        Ok(conversations) if conversations.is_empty() => {
            println!("{}", "No conversations yet.".yellow());
        }
        Ok(conversations) => {
            for summary in &conversations {
                println!("{}", format_summary(summary));
            }
        }
        Err(e) => println!("{}", format!("Failed to list conversations: {e}").red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use krx_chat_client::{HistoryResponse, RequestError, SendMessageRequest, SendMessageResponse};
    use krx_chat_core::ConversationId;
    use krx_chat_session::MemoryStore;

    struct FailingBackend(RequestError);

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn send_message(
            &self,
            _request: &SendMessageRequest,
        ) -> Result<SendMessageResponse, RequestError> {
            Err(self.0.clone())
        }

        async fn fetch_history(&self, _id: &ConversationId) -> Result<HistoryResponse, RequestError> {
            Err(self.0.clone())
        }
    }

    fn upstream_down() -> RequestError {
        RequestError::Server {
            status: 502,
            detail: Some("upstream down".to_string()),
        }
    }

    #[tokio::test]
    async fn failed_question_is_left_to_the_view() {
        let store = Arc::new(MemoryStore::new());
        let result = single_question(
            Arc::new(FailingBackend(upstream_down())),
            store,
            &ChatConfig::default(),
            "hello",
            true,
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn history_server_failure_is_reported() {
        let store = MemoryStore::with_id(ConversationId::new("c-1"));
        let result = history(&FailingBackend(upstream_down()), &store).await;
        assert!(result.is_err());
        assert_eq!(store.read(), Some(ConversationId::new("c-1")));
    }

    #[tokio::test]
    async fn history_not_found_clears_the_stored_id() {
        let store = MemoryStore::with_id(ConversationId::new("gone"));
        let backend = FailingBackend(RequestError::NotFound {
            resource: "/api/chat/history/gone".to_string(),
        });
        let result = history(&backend, &store).await;
        assert!(result.is_ok());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn lost_conversations_get_a_notice() {
        assert!(history_notice(&HistoryOutcome::NotFound).is_some());
        assert!(history_notice(&HistoryOutcome::Failed(upstream_down())).is_some());
        assert!(history_notice(&HistoryOutcome::Restored { messages: 3 }).is_none());
        assert!(history_notice(&HistoryOutcome::Skipped).is_none());
        assert!(history_notice(&HistoryOutcome::Superseded).is_none());
    }
}
