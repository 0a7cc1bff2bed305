//! # Conversation Log
//!
//! The ordered record of everything said in this session. Messages are
//! appended, never edited, reordered or removed. Display order is insertion
//! order.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown above a message.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Koa",
        }
    }
}

/// A single message. Fields are private so a message can't change after it
/// has been appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    text: String,
    sent_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::new(Role::User, text))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::new(Role::Assistant, text))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
