use crate::config::RunConfig;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Contents of `config.toml`. Only presentation is configurable here; the
/// simulation constants are fixed.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub draw_char: Option<char>,
    pub color_scheme: Option<u8>,
    pub show_status: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
}

/// Why a settings file was ignored
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("ignoring malformed settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file means defaults. Unreadable or malformed files are
    /// errors; callers fall back to defaults and report them once logging
    /// is up.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("config.toml")
    }

    /// Fill a run config from these settings
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(ch) = self.display.draw_char {
            config.draw_char = ch;
        }
        if let Some(scheme) = self.display.color_scheme {
            config.color_scheme = scheme;
        }
        if let Some(show) = self.display.show_status {
            config.show_status = show;
        }
        if let Some(file) = &self.log.file {
            config.log_file = Some(file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        let mut config = RunConfig::default();
        settings.apply(&mut config);
        assert_eq!(config.draw_char, RunConfig::default().draw_char);
        assert!(config.show_status);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn display_and_log_sections_override() {
        let settings = Settings::parse(
            r#"
[display]
draw_char = "o"
color_scheme = 3
show_status = false

[log]
file = "/tmp/termlife.log"
"#,
        )
        .unwrap();
        let mut config = RunConfig::default();
        settings.apply(&mut config);
        assert_eq!(config.draw_char, 'o');
        assert_eq!(config.color_scheme, 3);
        assert!(!config.show_status);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/termlife.log")));
    }

    #[test]
    fn malformed_settings_are_rejected() {
        assert!(Settings::parse("[display]\ncolor_scheme = \"red\"").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/termlife/config.toml")).unwrap();
        assert!(settings.display.draw_char.is_none());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = std::env::temp_dir().join(format!("termlife-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[display]\ncolor_scheme = \"red\"\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        let message = err.to_string();
        assert!(message.starts_with("ignoring malformed settings"), "{message}");
        assert!(message.contains("config.toml"), "{message}");

        fs::remove_dir_all(&dir).unwrap();
    }
}
