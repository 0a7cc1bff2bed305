//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{BackendError, ChatBackend};
use crate::core::prefs::Theme;
use crate::core::state::App;
use crate::voice::{Recognizer, VoiceError};

/// Backend that answers once with a canned outcome and records what it was sent.
pub struct ScriptedBackend {
    outcome: Mutex<Option<Result<String, BackendError>>>,
    pub sent: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            outcome: Mutex::new(Some(Ok(reply.to_string()))),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, message: &str) -> Result<String, BackendError> {
        self.sent.lock().unwrap().push(message.to_string());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(BackendError::Network("script exhausted".to_string())))
    }
}

/// Recognizer that "hears" a fixed transcript.
pub struct StubRecognizer {
    transcript: String,
    pub listens: AtomicUsize,
}

impl StubRecognizer {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            listens: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Recognizer for StubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        self.listens.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.clone())
    }
}

/// Creates a test App with a backend that never gets a reply script.
pub fn test_app() -> App {
    App::new(
        Arc::new(ScriptedBackend::failing(BackendError::Network(
            "no backend in tests".to_string(),
        ))),
        Theme::Dark,
    )
}
