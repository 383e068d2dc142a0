//! Chat history — an in-memory transcript with JSON persistence.
//!
//! Messages are inert display content: once a response is rendered into the
//! transcript it is never reprocessed. Persistence is a single JSON file in
//! the data directory, the desktop analog of the original's browser storage.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::composer::ResponseOption;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
}

/// Display content of a message: plain text, or text with follow-up buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    Plain { text: String },
    Interactive {
        text: String,
        options: Vec<ResponseOption>,
    },
}

impl MessageContent {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } => text,
            Self::Interactive { text, .. } => text,
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

/// The transcript, bounded to `limit` most recent messages.
#[derive(Debug)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    limit: usize,
}

impl ChatHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit,
        }
    }

    /// Load a saved transcript, or start empty when the file is missing or
    /// unreadable (a corrupt history file is not worth failing startup over).
    pub fn load(path: &Path, limit: usize) -> Self {
        let messages = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<ChatMessage>>(&contents) {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(path = %path.display(), err = %e, "history file unreadable — starting fresh");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        let mut history = Self { messages, limit };
        history.trim();
        history
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating history directory '{}'", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.messages)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing history file '{}'", path.display()))?;
        debug!(path = %path.display(), count = self.messages.len(), "history saved");
        Ok(())
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Role::User, MessageContent::Plain { text: text.into() });
    }

    pub fn push_agent(&mut self, text: impl Into<String>, options: Option<Vec<ResponseOption>>) {
        let text = text.into();
        let content = match options {
            Some(options) if !options.is_empty() => MessageContent::Interactive { text, options },
            _ => MessageContent::Plain { text },
        };
        self.push(Role::Agent, content);
    }

    fn push(&mut self, role: Role, content: MessageContent) {
        self.messages.push(ChatMessage {
            role,
            content,
            timestamp: Utc::now(),
        });
        self.trim();
    }

    fn trim(&mut self) {
        if self.limit > 0 && self.messages.len() > self.limit {
            let excess = self.messages.len() - self.limit;
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Default history file location inside the data directory.
pub fn history_path(data_dir: &Path) -> PathBuf {
    data_dir.join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{OptionKind, ResponseOption};

    fn option() -> ResponseOption {
        ResponseOption {
            text: "Pay a bill".to_string(),
            action: "pay_now".to_string(),
            kind: OptionKind::Primary,
        }
    }

    #[test]
    fn agent_message_with_options_is_interactive() {
        let mut history = ChatHistory::new(10);
        history.push_agent("done", Some(vec![option()]));
        match &history.messages()[0].content {
            MessageContent::Interactive { options, .. } => assert_eq!(options.len(), 1),
            other => panic!("expected interactive content, got {other:?}"),
        }
    }

    #[test]
    fn empty_options_collapse_to_plain() {
        let mut history = ChatHistory::new(10);
        history.push_agent("done", Some(vec![]));
        assert!(matches!(
            history.messages()[0].content,
            MessageContent::Plain { .. }
        ));
    }

    #[test]
    fn history_is_bounded() {
        let mut history = ChatHistory::new(3);
        for i in 0..10 {
            history.push_user(format!("message {i}"));
        }
        assert_eq!(history.messages().len(), 3);
        assert_eq!(history.messages()[0].content.text(), "message 7");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = history_path(dir.path());

        let mut history = ChatHistory::new(10);
        history.push_user("pay my water bill");
        history.push_agent("Your balance is $78.45.", Some(vec![option()]));
        history.save(&path).expect("save");

        let loaded = ChatHistory::load(&path, 10);
        assert_eq!(loaded.messages().len(), 2);
        assert_eq!(loaded.messages()[1].content.text(), "Your balance is $78.45.");
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = history_path(dir.path());
        std::fs::write(&path, "not json").expect("write");
        let loaded = ChatHistory::load(&path, 10);
        assert!(loaded.is_empty());
    }
}
