//! Configuration for the terminal front-end.
//!
//! Loaded via the `config` crate from `KRX_*` environment variables, then
//! overridden by command-line flags.

use crate::cli::Cli;
use krx_chat_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use krx_chat_core::Language;
use krx_chat_session::{ConversationStore, FileStore, MemoryStore};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const STORE_FILE_NAME: &str = ".krx_chat_conversation_id";

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatConfig {
    /// Origin of the assistant service.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request time limit in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Reply language.
    #[serde(default)]
    pub language: Language,

    /// File holding the active conversation id.
    /// Without one the id only lives for the current run.
    #[serde(default = "default_store_path")]
    pub store_path: Option<PathBuf>,

    /// Whether interactive mode resumes the stored conversation.
    #[serde(default)]
    pub resume: bool,
}

fn default_api_base() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_store_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(STORE_FILE_NAME))
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            language: Language::default(),
            store_path: default_store_path(),
            resume: false,
        }
    }
}

impl ChatConfig {
    /// Loads configuration from `KRX_*` environment variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("KRX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(api) = &cli.api {
            self.api_base.clone_from(api);
        }
        if let Some(language) = cli.lang {
            self.language = language;
        }
        if cli.resume {
            self.resume = true;
        }
        self
    }

    /// Returns the request settings.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Returns the conversation store.
    #[must_use]
    pub fn store(&self) -> Arc<dyn ConversationStore> {
        match &self.store_path {
            Some(path) => Arc::new(FileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> ChatConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ChatConfig::from_environment(ChatConfig::environment().source(Some(map)))
            .expect("config loads")
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = load(&[]);
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.language, Language::Korean);
        assert!(!config.resume);
        assert_eq!(config.store_path, default_store_path());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(&[
            ("KRX_API_BASE", "http://dashboard:9000"),
            ("KRX_TIMEOUT_SECS", "15"),
            ("KRX_LANGUAGE", "en"),
            ("KRX_STORE_PATH", "/tmp/krx-id"),
            ("KRX_RESUME", "true"),
        ]);
        assert_eq!(config.api_base, "http://dashboard:9000");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/krx-id")));
        assert!(config.resume);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let map = HashMap::from([("KRX_LANGUAGE".to_string(), "fr".to_string())]);
        let result = ChatConfig::from_environment(ChatConfig::environment().source(Some(map)));
        assert!(result.is_err());
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "krx-chat",
            "--api",
            "http://other:1",
            "--lang",
            "en",
            "--resume",
        ]);
        let config = ChatConfig::default().with_overrides(&cli);
        assert_eq!(config.api_base, "http://other:1");
        assert_eq!(config.language, Language::English);
        assert!(config.resume);
    }

    #[test]
    fn client_config_uses_timeout() {
        let config = ChatConfig {
            timeout_secs: 5,
            ..ChatConfig::default()
        };
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
    }
}
