use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    APP_NAME, DEFAULT_ASSISTANT_ENDPOINT, DEFAULT_ASSISTANT_TIMEOUT_SECS, ENV_PREFIX,
    LOCAL_CONFIG_DIR, SEARCH_DEBOUNCE_MS, UI_REFRESH_INTERVAL_MS,
};
use crate::portal::UserProfile;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote assistant settings
    #[serde(default)]
    pub assistant: AssistantSettings,

    /// Where the alumni records come from
    #[serde(default)]
    pub directory: DirectorySettings,

    /// The signed-in user shown on the dashboard and profile page
    #[serde(default)]
    pub profile: UserProfile,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Remote assistant settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Endpoint receiving `{"message": ...}` posts
    pub endpoint: String,
    /// Whole-request timeout in seconds; 0 disables the controller-side timer
    pub timeout_secs: u64,
    /// Cookie header sent with every request (the portal session)
    pub session_cookie: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ASSISTANT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_ASSISTANT_TIMEOUT_SECS,
            session_cookie: None,
        }
    }
}

impl AssistantSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Record source settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// JSON array of alumni records; the built-in sample directory when unset
    pub data_file: Option<PathBuf>,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIConfig {
    /// Quiet period after the last search keystroke before filtering
    pub search_debounce_ms: u64,
    /// Redraw interval
    pub tick_ms: u64,
    /// Show the activity feed on the dashboard
    pub show_activity: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            tick_ms: UI_REFRESH_INTERVAL_MS,
            show_activity: true,
        }
    }
}

/// Load configuration from multiple sources.
/// Order: defaults < global file < project file < `ALUMNI_PORTAL_*` env < `explicit` file.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(LOCAL_CONFIG_DIR).join("config.toml");
    layered_config(Some(&global_config), &local_config, explicit)
}

fn layered_config(
    global_config: Option<&Path>,
    local_config: &Path,
    explicit: Option<&Path>,
) -> Result<Config> {
    // Build figment configuration
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if let Some(global) = global_config.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(global));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(local_config));
    }

    // Add environment variables, `__` separating nested keys
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    // Extract and return config
    figment.extract().context("Failed to load configuration")
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = project_dirs() {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Directory for the log file written while the terminal UI is running
pub fn get_data_dir() -> Result<PathBuf> {
    match project_dirs() {
        Some(proj_dirs) => Ok(proj_dirs.data_local_dir().to_path_buf()),
        None => get_config_dir(),
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(path)
}

/// Create a default configuration file if it doesn't exist.
/// Returns the files that were written.
pub fn init_config() -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        written.push(save_config(&Config::default(), Some(config_file))?);
    }

    // Create example local config
    let local_example = PathBuf::from(LOCAL_CONFIG_DIR).join("config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# Alumni Portal project configuration
# This file overrides global settings for this directory

[assistant]
endpoint = "https://connect.williams.edu/manage/database/gpt"
timeout_secs = 60
# session_cookie = "sessionid=..."

[directory]
# data_file = "alumni.json"

[profile]
name = "Alumni User"
initials = "AL"
class = "2020"
"#;
        std::fs::write(&local_example, example_config)?;
        written.push(local_example);
    }

    Ok(written)
}
