use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    /// Label for the toggle control, which offers the opposite scheme
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "Dark mode",
            Theme::Dark => "Light mode",
        }
    }

    /// Stored flag wins; otherwise fall back to the configured default
    pub fn resolve(stored: Option<Theme>, fallback: Theme) -> Theme {
        stored.unwrap_or(fallback)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Unknown theme: {0:?} (expected dark or light)")]
    Unknown(String),

    #[error("Theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Persists the single theme flag between runs
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored flag; `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<Theme>, ThemeError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No theme stored at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(ThemeError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        content.parse().map(Some)
    }

    pub fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let io_err = |source| ThemeError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        fs::write(&self.path, theme.as_str()).map_err(io_err)?;
        info!("Theme set to {}", theme);
        Ok(())
    }

    /// Flip the current theme and store the result
    pub fn toggle(&self, fallback: Theme) -> Result<Theme, ThemeError> {
        let next = Theme::resolve(self.load()?, fallback).toggle();
        self.save(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fixture-board-{}-{}", name, std::process::id()))
            .join("theme")
    }

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());

        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_label(), "Light mode");
    }

    #[test]
    fn test_resolve_prefers_stored() {
        assert_eq!(Theme::resolve(Some(Theme::Dark), Theme::Light), Theme::Dark);
        assert_eq!(Theme::resolve(None, Theme::Dark), Theme::Dark);
    }

    #[test]
    fn test_store_round_trip() {
        let path = temp_path("round-trip");
        let store = ThemeStore::new(&path);

        assert_eq!(store.load().unwrap(), None);

        store.save(Theme::Dark).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "dark");
        assert_eq!(store.load().unwrap(), Some(Theme::Dark));

        assert_eq!(store.toggle(Theme::Dark).unwrap(), Theme::Light);
        assert_eq!(store.load().unwrap(), Some(Theme::Light));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "purple").unwrap();

        let store = ThemeStore::new(&path);
        assert!(matches!(store.load(), Err(ThemeError::Unknown(_))));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
