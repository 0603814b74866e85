//! Platform path resolution.
//!
//! The settings document lives under `~/.config/qwenworkbench` on every
//! platform; downloaded artifacts default to the platform data directory
//! (`~/Library/Application Support` on macOS, `$XDG_DATA_HOME` on Linux).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory name under `~/.config`.
pub const CONFIG_DIR_NAME: &str = "qwenworkbench";

/// File name of the settings document.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// File name of the append-only chat log.
pub const CHAT_LOG_FILE_NAME: &str = "chat_history.jsonl";

/// Path resolution errors.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Could not determine the home directory")]
    NoHomeDir,
}

/// Default configuration directory: `~/.config/qwenworkbench`.
pub fn default_config_dir() -> Result<PathBuf, PathError> {
    let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Settings file inside a configuration directory.
pub fn settings_file(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE_NAME)
}

/// Default root for downloaded model artifacts.
pub fn default_model_cache_dir() -> Result<PathBuf, PathError> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .ok_or(PathError::NoHomeDir)?;
    Ok(base.join("QwenWorkbench").join("models"))
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_passthrough() {
        assert_eq!(expand_home(Path::new("/var/models")), PathBuf::from("/var/models"));
        assert_eq!(expand_home(Path::new("models/~x")), PathBuf::from("models/~x"));
    }

    #[test]
    fn test_expand_home_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/models")), home.join("models"));
        }
    }

    #[test]
    fn test_settings_file_location() {
        let dir = PathBuf::from("/cfg");
        assert_eq!(settings_file(&dir), PathBuf::from("/cfg/settings.json"));
    }
}
