//! Recognizer backed by an external speech-to-text program.
//!
//! The program records one utterance and prints its transcript to stdout.
//! Arguments may contain `{lang}`, replaced with the configured language.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use super::{Recognizer, VoiceError};

pub struct CommandRecognizer {
    program: PathBuf,
    args: Vec<String>,
    lang: String,
}

impl CommandRecognizer {
    pub fn new(program: PathBuf, args: Vec<String>, lang: String) -> Self {
        Self { program, args, lang }
    }

    fn expanded_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace("{lang}", &self.lang))
            .collect()
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    fn name(&self) -> &str {
        "command"
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        let args = self.expanded_args();
        info!("Starting recognizer: {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .env("KOA_VOICE_LANG", &self.lang)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| VoiceError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VoiceError::Engine(format!("{} ({})", stderr, output.status)));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Recognizer produced {} bytes", transcript.len());
        if transcript.is_empty() {
            return Err(VoiceError::NoSpeech);
        }
        Ok(transcript)
    }
}

/// Resolve a program the way a shell would. Only executables count.
pub fn resolve_program(program: &str) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => Some(path),
        Err(e) => {
            debug!("Recognizer '{}' not resolvable: {}", program, e);
            None
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandRecognizer {
        CommandRecognizer::new(
            PathBuf::from("/bin/sh"),
            vec!["-c".to_string(), script.to_string()],
            "en-US".to_string(),
        )
    }

    #[tokio::test]
    async fn test_stdout_is_trimmed_transcript() {
        let rec = sh("printf '  turn on the lights \\n'");
        assert_eq!(rec.listen().await.unwrap(), "turn on the lights");
    }

    #[tokio::test]
    async fn test_language_placeholder_is_expanded() {
        let rec = sh("echo {lang} $KOA_VOICE_LANG");
        assert_eq!(rec.listen().await.unwrap(), "en-US en-US");
    }

    #[tokio::test]
    async fn test_empty_output_is_no_speech() {
        let rec = sh("true");
        assert!(matches!(rec.listen().await, Err(VoiceError::NoSpeech)));
    }

    #[tokio::test]
    async fn test_failure_status_is_engine_error() {
        let rec = sh("echo 'mic busy' >&2; exit 3");
        match rec.listen().await {
            Err(VoiceError::Engine(msg)) => assert!(msg.contains("mic busy")),
            other => panic!("expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_explicit_path() {
        assert_eq!(resolve_program("/bin/sh"), Some(PathBuf::from("/bin/sh")));
        assert_eq!(resolve_program("/no/such/recognizer"), None);
    }

    #[test]
    fn test_non_executable_file_is_not_a_recognizer() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let stt = dir.path().join("stt");
        std::fs::write(&stt, "#!/bin/sh\necho hi\n").unwrap();
        std::fs::set_permissions(&stt, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(resolve_program(stt.to_str().unwrap()), None);

        std::fs::set_permissions(&stt, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(resolve_program(stt.to_str().unwrap()), Some(stt));
    }
}
