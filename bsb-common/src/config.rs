//! Configuration loading and option defaults
//!
//! Options are loaded from a TOML file resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `BSB_CONFIG` environment variable
//! 3. Platform config directory (`<config dir>/bsb/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::segment::Category;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "BSB_CONFIG";

/// Configured playback response to a segment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Seek past the segment and show a "skipped" notice
    #[serde(rename = "skip")]
    Skip,
    /// Force-mute for the duration of the segment
    #[serde(rename = "mute")]
    Mute,
    /// Offer a manual skip button; never seek automatically
    #[serde(rename = "full")]
    ManualButton,
    /// Informational notice only, no playback side effect
    #[serde(rename = "overlay")]
    Overlay,
    /// Silently ignore the category
    #[serde(rename = "disabled")]
    Disabled,
}

/// Metadata service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiOptions {
    /// Base URL of the metadata service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: "https://bsbsb.top/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Tracker behavior tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Entries within this many seconds of a skip segment's start are
    /// skipped automatically; later entries get a manual button instead
    pub skip_entry_window_secs: f64,
    /// Whether mid-segment entry offers a manual button (false means
    /// unconditional auto-skip regardless of entry point)
    pub late_entry_button: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            skip_entry_window_secs: 1.0,
            late_entry_button: true,
        }
    }
}

/// Bounded-wait tuning for readiness polling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Interval between probe attempts in milliseconds
    pub poll_interval_ms: u64,
    /// Total time to wait before giving up in milliseconds
    pub timeout_ms: u64,
}

impl WaitOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            timeout_ms: 10_000,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Per-category playback action; unset categories default to skip
    pub category_actions: HashMap<Category, Action>,
    /// Metadata service settings
    pub api: ApiOptions,
    /// Tracker behavior tuning
    pub tracker: TrackerOptions,
    /// Readiness-wait tuning
    pub wait: WaitOptions,
}

impl Options {
    /// Default per-category actions
    pub fn default_category_actions() -> HashMap<Category, Action> {
        HashMap::from([
            (Category::Sponsor, Action::Skip),
            (Category::SelfPromo, Action::Mute),
            (Category::ExclusiveAccess, Action::ManualButton),
            (Category::Interaction, Action::Mute),
            (Category::Intro, Action::Mute),
            (Category::Outro, Action::Mute),
            (Category::Preview, Action::Overlay),
            (Category::Filler, Action::Disabled),
            (Category::MusicOfftopic, Action::Skip),
            (Category::PoiHighlight, Action::Mute),
        ])
    }

    /// Load options following the CLI → env → config dir → default priority
    ///
    /// A missing config file falls through to defaults; a file that exists
    /// but fails to read or parse is a configuration error.
    pub fn load(cli_arg: Option<&PathBuf>) -> Result<Self> {
        match resolve_config_path(cli_arg) {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("failed to read {}: {}", path.display(), e))
                })?;
                let mut options: Options = toml::from_str(&content).map_err(|e| {
                    Error::Config(format!("failed to parse {}: {}", path.display(), e))
                })?;
                // File-provided actions overlay the defaults rather than
                // replacing the whole map
                let mut actions = Self::default_category_actions();
                actions.extend(options.category_actions.drain());
                options.category_actions = actions;
                tracing::info!(path = %path.display(), "loaded configuration");
                Ok(options)
            }
            None => Ok(Self {
                category_actions: Self::default_category_actions(),
                ..Self::default()
            }),
        }
    }
}

/// Resolve the config file path, or None to use compiled defaults
fn resolve_config_path(cli_arg: Option<&PathBuf>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.clone());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: Platform config directory, only if the file exists
    if let Some(path) = dirs::config_dir().map(|d| d.join("bsb").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    // Priority 4: Compiled defaults
    None
}
