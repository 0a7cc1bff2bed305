//! # Voice Input
//!
//! Speech-to-text is an optional capability. When no recognizer can be found
//! at startup the mic control stays disabled for the whole session.
//!
//! A recognizer captures exactly one utterance per `listen()` call. Stopping
//! early is done by dropping the future (the TUI aborts the task running it).

pub mod command;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::core::config::ResolvedConfig;

pub use command::CommandRecognizer;

#[derive(Debug)]
pub enum VoiceError {
    /// The recognizer process couldn't be started.
    Spawn(String),
    /// The recognizer ran but reported a failure.
    Engine(String),
    /// Nothing was heard.
    NoSpeech,
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceError::Spawn(msg) => write!(f, "failed to start recognizer: {msg}"),
            VoiceError::Engine(msg) => write!(f, "recognizer error: {msg}"),
            VoiceError::NoSpeech => write!(f, "no speech detected"),
        }
    }
}

impl std::error::Error for VoiceError {}

#[async_trait]
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Capture one utterance and return its transcript.
    async fn listen(&self) -> Result<String, VoiceError>;
}

/// Find a usable recognizer for this session, if any.
pub fn detect(config: &ResolvedConfig) -> Option<Arc<dyn Recognizer>> {
    let Some(program) = config.voice_command.as_deref() else {
        info!("Voice input disabled: no [voice] command configured");
        return None;
    };

    match command::resolve_program(program) {
        Some(path) => {
            info!("Voice input enabled via {}", path.display());
            Some(Arc::new(CommandRecognizer::new(
                path,
                config.voice_args.clone(),
                config.voice_lang.clone(),
            )))
        }
        None => {
            warn!("Voice input disabled: '{}' not found", program);
            None
        }
    }
}

/// Append a transcript to the draft, space-separated when the draft has text.
pub fn join_transcript(draft: &str, transcript: &str) -> String {
    if draft.is_empty() {
        transcript.to_string()
    } else {
        format!("{draft} {transcript}")
    }
}
