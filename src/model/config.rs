use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_TITLE: &str = "BO6 Camo Tracker";
pub const DEFAULT_STATE_FILE: &str = "camos.json";
pub const DEFAULT_DONE_MARKER: &str = "\u{2705}";

/// Configuration from camo.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerInfo {
    /// Title of the root (category) list
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for TrackerInfo {
    fn default() -> Self {
        TrackerInfo {
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persisted state file, relative to the data directory
    #[serde(default = "default_state_file")]
    pub file: String,
    /// Seed file replacing the bundled dataset, relative to the data directory
    #[serde(default)]
    pub seed: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file: default_state_file(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Appended to the label of completed entries
    #[serde(default = "default_done_marker")]
    pub done_marker: String,
    /// Show "done/total" beside category names and the root title
    #[serde(default = "default_true")]
    pub show_progress: bool,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            done_marker: default_done_marker(),
            show_progress: true,
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_state_file() -> String {
    DEFAULT_STATE_FILE.to_string()
}

fn default_done_marker() -> String {
    DEFAULT_DONE_MARKER.to_string()
}

fn default_true() -> bool {
    true
}
