use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stores user-configurable dashboard preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_goal")]
    pub default_goal: f64,
    #[serde(default = "Config::default_monthly_target")]
    pub default_monthly_target: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for share snapshots and config. Defaults to
    /// the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            default_goal: Self::default_goal(),
            default_monthly_target: Self::default_monthly_target(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "ZAR".into()
    }

    pub fn default_goal() -> f64 {
        6000.0
    }

    pub fn default_monthly_target() -> f64 {
        3000.0
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("safy")
    }
}
