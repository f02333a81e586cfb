use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::evaluator::{MatchRule, DEFAULT_TOLERANCE};
use crate::gesture::{Smoothing, DEFAULT_EASE_RATE};
use crate::runtime::{DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX};
use crate::session::{SessionConfig, DEFAULT_MAX_ATTEMPTS};
use crate::timer::DEFAULT_TIMER_SECS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub timer_secs: u32,
    pub max_attempts: u32,
    pub tolerance: f64,
    pub match_rule: MatchRule,
    pub smoothing: Smoothing,
    pub ease_rate: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer_secs: DEFAULT_TIMER_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            tolerance: DEFAULT_TOLERANCE,
            match_rule: MatchRule::Target,
            smoothing: Smoothing::Immediate,
            ease_rate: DEFAULT_EASE_RATE,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            timer_secs: cfg.timer_secs,
            max_attempts: cfg.max_attempts,
            tolerance: cfg.tolerance,
            match_rule: cfg.match_rule,
            smoothing: cfg.smoothing,
            ease_rate: cfg.ease_rate,
        }
    }
}

pub trait ConfigStore {
    /// Falls back to defaults when nothing usable is stored.
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("huematch_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
