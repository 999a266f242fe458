use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
use crate::error::ArcadeError;
use crate::food::FoodPlacement;
use crate::snake::{ReversalPolicy, SnakeRules};

const APP_DIR_NAME: &str = "grid-arcade";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-tunable runtime settings. Game progress is never stored here.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub food_placement: FoodPlacement,
    pub reversal: ReversalPolicy,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_placement: FoodPlacement::default(),
            reversal: ReversalPolicy::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Snake tick interval, never faster than the minimum.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }

    #[must_use]
    pub fn snake_rules(&self) -> SnakeRules {
        SnakeRules {
            food: self.food_placement,
            reversal: self.reversal,
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from disk.
///
/// Returns defaults when the file does not exist yet. Returns `Err` when the
/// file exists but cannot be read or parsed, so the caller can warn before
/// entering raw terminal mode.
pub fn load_settings() -> Result<Settings, ArcadeError> {
    let path = settings_path();
    load_settings_from_path(&path).map_err(|source| settings_error(&path, source))
}

/// Saves settings, creating parent directories when needed.
pub fn save_settings(settings: &Settings) -> Result<(), ArcadeError> {
    let path = settings_path();
    save_settings_to_path(&path, settings).map_err(|source| settings_error(&path, source))
}

fn settings_error(path: &Path, source: io::Error) -> ArcadeError {
    ArcadeError::Settings {
        path: path.display().to_string(),
        source,
    }
}

fn load_settings_from_path(path: &Path) -> io::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<Settings>(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_settings_to_path(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
