use std::{
    ops::Not,
    path::{Path, PathBuf},
};

use eframe::egui;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_snooze_minutes() -> i64 {
    5
}

fn default_alarm_sound() -> PathBuf {
    Config::sounds_path().join("sound.wav")
}

/// settings only. the alarms themselves are never written to disk, they
/// vanish when the app closes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: i64,
    #[serde(default = "default_alarm_sound")]
    pub alarm_sound: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            theme: Theme::Dark,
            snooze_minutes: default_snooze_minutes(),
            alarm_sound: default_alarm_sound(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// read the config, falling back to defaults when the file is missing
    /// or doesn't parse. never a reason to refuse to start.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|err| {
                warn!("couldn't parse config file: {err}");
                Self::default()
            }),
            Err(err) => {
                warn!("couldn't read config file: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let raw = toml::to_string(self).map_err(std::io::Error::other)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, raw)
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        let mut path = directories::ProjectDirs::from("", "", "wakey_clock")
            .expect("couldn't get config path")
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        path
    }

    #[must_use]
    pub fn sounds_path() -> PathBuf {
        let mut path = directories::ProjectDirs::from("", "", "wakey_clock")
            .expect("couldn't get sounds directory path")
            .data_dir()
            .to_path_buf();
        path.push("sounds");
        path
    }

    #[must_use]
    pub fn is_config_present() -> bool {
        Self::config_path().exists()
    }
}
