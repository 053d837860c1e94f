use log::warn;
use retroframe_core::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Hotkey names, spelled the way [`crate::keybinds::parse_key`] reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub save_state: String,
    pub load_state: String,
    pub fullscreen: String,
    pub quit: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            save_state: "F5".to_owned(),
            load_state: "F9".to_owned(),
            fullscreen: "F11".to_owned(),
            quit: "Escape".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// BIOS and other files cores look up. Defaults to the working directory.
    pub system_directory: Option<PathBuf>,
    /// Battery saves. Defaults to the working directory.
    pub save_directory: Option<PathBuf>,
    /// Where F5/F9 states go. Defaults to the save directory.
    pub state_directory: Option<PathBuf>,
    pub username: String,
    /// A `RETRO_LANGUAGE_*` id.
    pub language: u32,
    /// Integer window scale over the core's base geometry.
    pub scale: u32,
    /// Queued audio frames above which the core's audio is dropped.
    pub audio_latency_frames: u32,
    /// Core option overrides.
    pub variables: HashMap<String, String>,
    pub hotkeys: HotkeyConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            system_directory: None,
            save_directory: None,
            state_directory: None,
            username: "retroframe".to_owned(),
            language: 0,
            scale: 3,
            audio_latency_frames: 2048,
            variables: HashMap::new(),
            hotkeys: HotkeyConfig::default(),
        }
    }
}

impl FrontendConfig {
    pub fn bridge_config(&self) -> BridgeConfig {
        let defaults = BridgeConfig::default();
        let save_directory = self
            .save_directory
            .clone()
            .unwrap_or(defaults.save_directory);
        BridgeConfig {
            system_directory: self
                .system_directory
                .clone()
                .unwrap_or(defaults.system_directory),
            core_assets_directory: defaults.core_assets_directory,
            save_directory,
            username: self.username.clone(),
            language: self.language,
            max_users: defaults.max_users,
            variable_overrides: self.variables.clone(),
        }
    }

    pub fn state_directory(&self) -> PathBuf {
        self.state_directory
            .clone()
            .or_else(|| self.save_directory.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("retroframe").join("config.toml");
        }
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("retroframe").join("config.toml");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("retroframe")
            .join("config.toml");
    }

    PathBuf::from("config.toml")
}

/// Reads the config, falling back to defaults when the file is missing or
/// malformed.
pub fn load_from_file(path: &Path) -> FrontendConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return FrontendConfig::default(),
    };

    match toml::from_str::<FrontendConfig>(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(
                "Failed to parse config {}: {e}; using defaults",
                path.display()
            );
            FrontendConfig::default()
        }
    }
}
