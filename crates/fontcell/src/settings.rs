//! Persisted CLI defaults.
//!
//! `settings.toml` in the platform config directory holds the defaults that
//! flags fall back to. A missing or corrupt file is replaced with defaults
//! and recreated; loading and saving never aborts the program.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fs, io::Write, path::PathBuf};

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "fontcell";

static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Report per-glyph placement detail by default.
    #[serde(default)]
    pub verbose: bool,

    /// Horizontal zoom of the terminal preview, characters per pixel.
    #[serde(default = "default_preview_scale")]
    pub preview_scale: usize,

    /// Glyphs per preview row.
    #[serde(default = "default_preview_cols")]
    pub preview_cols: usize,
}

fn default_preview_scale() -> usize {
    1
}

fn default_preview_cols() -> usize {
    16
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            preview_scale: default_preview_scale(),
            preview_cols: default_preview_cols(),
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.toml";

    /// Load from the config file, falling back to defaults. The file is
    /// created with defaults on first run.
    pub fn load() -> Self {
        let Some(path) = Self::config_file() else {
            return Self::default();
        };
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(txt) => match toml::from_str::<Settings>(&txt) {
                    Ok(settings) => return settings,
                    Err(err) => log::error!("Error parsing settings file: {err}"),
                },
                Err(err) => log::error!("Error reading settings file: {err}"),
            }
            return Self::default();
        }
        log::info!("Settings file not found, creating it with defaults.");
        let settings = Self::default();
        settings.store();
        settings
    }

    /// Atomically write the settings to file (write to temp, then rename).
    pub fn store(&self) {
        let Some(config_dir) = Self::config_dir() else {
            log::error!("Cannot determine config directory for saving settings");
            return;
        };
        if !config_dir.exists() {
            if let Err(err) = fs::create_dir_all(&config_dir) {
                log::error!("Can't create configuration directory {config_dir:?}: {err}");
                return;
            }
        }

        let file_path = config_dir.join(Self::FILE_NAME);
        let temp_path = config_dir.join(format!(".{}.tmp", Self::FILE_NAME));

        match toml::to_string_pretty(self) {
            Ok(text) => {
                let write_result = (|| -> std::io::Result<()> {
                    let mut file = fs::File::create(&temp_path)?;
                    file.write_all(text.as_bytes())?;
                    file.sync_all()?;
                    Ok(())
                })();

                if let Err(err) = write_result {
                    log::error!("Error writing temp settings file: {err}");
                    let _ = fs::remove_file(&temp_path);
                    return;
                }

                if let Err(err) = fs::rename(&temp_path, &file_path) {
                    log::error!("Error renaming settings file: {err}");
                    let _ = fs::remove_file(&temp_path);
                }
            }
            Err(err) => log::error!("Error serializing settings: {err}"),
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}
