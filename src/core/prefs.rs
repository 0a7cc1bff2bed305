//! # Preferences
//!
//! The only state that survives a restart: the theme choice.
//!
//! Stored as `~/.koa/prefs.toml`. Writes go through a `.tmp` file and
//! `rename()` so a crash mid-write never leaves a half-written file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct PrefsFile {
    theme: Option<Theme>,
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.koa/prefs.toml`. `None` when there's no home directory.
    pub fn in_home() -> Option<Self> {
        dirs::home_dir().map(|h| Self::new(h.join(".koa").join("prefs.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved theme. Missing or unreadable files fall back to dark.
    pub fn load_theme(&self) -> Theme {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Theme::default(),
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Theme::default();
            }
        };

        match toml::from_str::<PrefsFile>(&contents) {
            Ok(prefs) => prefs.theme.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", self.path.display(), e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let prefs = PrefsFile { theme: Some(theme) };
        let body = toml::to_string(&prefs)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, body)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("Theme saved: {}", theme.label());
        Ok(())
    }
}
