//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.koa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The theme is not configured here; it is a preference (see `prefs`).

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::prefs::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KoaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub lang: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub voice_command: Option<String>,
    pub theme: Option<Theme>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9010";
pub const DEFAULT_VOICE_LANG: &str = "en-US";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// Speech-to-text program; `None` disables voice input.
    pub voice_command: Option<String>,
    pub voice_args: Vec<String>,
    pub voice_lang: String,
    /// Session-only theme from `--theme`, wins over the stored preference.
    pub theme_override: Option<Theme>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.koa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".koa").join("config.toml"))
}

/// Load config from `~/.koa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KoaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KoaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KoaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<KoaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(KoaConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: KoaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Koa Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# base_url = "http://127.0.0.1:9010"    # Or set KOA_BASE_URL; requests go to {base_url}/chat

# [voice]
# command = "whisper-once"              # Or set KOA_VOICE_COMMAND; prints one transcript to stdout
# args = ["--lang", "{lang}"]
# lang = "en-US"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &KoaConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("KOA_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Voice command: CLI → env → config
    let voice_command = cli
        .voice_command
        .clone()
        .or_else(|| std::env::var("KOA_VOICE_COMMAND").ok())
        .or_else(|| config.voice.command.clone())
        .filter(|c| !c.trim().is_empty());

    ResolvedConfig {
        base_url,
        voice_command,
        voice_args: config.voice.args.clone().unwrap_or_default(),
        voice_lang: config
            .voice
            .lang
            .clone()
            .unwrap_or_else(|| DEFAULT_VOICE_LANG.to_string()),
        theme_override: cli.theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&KoaConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.voice_lang, DEFAULT_VOICE_LANG);
        assert!(resolved.voice_args.is_empty());
        assert!(resolved.theme_override.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = KoaConfig {
            general: GeneralConfig {
                base_url: Some("http://koa.local:8080".to_string()),
            },
            voice: VoiceConfig {
                command: Some("stt".to_string()),
                args: Some(vec!["--once".to_string()]),
                lang: Some("de-DE".to_string()),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.base_url, "http://koa.local:8080");
        assert_eq!(resolved.voice_args, vec!["--once"]);
        assert_eq!(resolved.voice_lang, "de-DE");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = KoaConfig {
            general: GeneralConfig {
                base_url: Some("http://from-file:1".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli:2".to_string()),
            voice_command: Some("stt-cli".to_string()),
            theme: Some(Theme::Light),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://from-cli:2");
        assert_eq!(resolved.voice_command.as_deref(), Some("stt-cli"));
        assert_eq!(resolved.theme_override, Some(Theme::Light));
    }

    #[test]
    fn test_blank_voice_command_disables_voice() {
        let cli = CliOverrides {
            voice_command: Some("   ".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&KoaConfig::default(), &cli);
        assert!(resolved.voice_command.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
base_url = "http://10.0.0.2:9010"

[voice]
command = "whisper-once"
args = ["--lang", "{lang}"]
"#;
        let config: KoaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.base_url.as_deref(), Some("http://10.0.0.2:9010"));
        assert_eq!(config.voice.command.as_deref(), Some("whisper-once"));
        assert_eq!(config.voice.args.as_ref().map(Vec::len), Some(2));
        assert!(config.voice.lang.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: KoaConfig = toml::from_str("[voice]\nlang = \"fr-FR\"\n").unwrap();
        assert!(config.general.base_url.is_none());
        assert_eq!(config.voice.lang.as_deref(), Some("fr-FR"));
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".koa").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.base_url.is_none());

        // The generated file is all comments, so it parses to defaults too.
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("base_url"));
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.voice.command.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nbase_url = 3").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
