mod checks;
mod default;

use anyhow::Result;
use codeview_core::models::Shader;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Which apps may be flipped, by app id (the desktop id without `.desktop`).
///
/// In `config.toml`
///
/// ```toml
/// [flip_to_hack]
/// block_list = ["org.example.Banking"]
/// allow_list = []
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FlipToHack {
    pub block_list: Vec<String>,
    /// An empty list allows every app that is not blocked.
    pub allow_list: Vec<String>,
}

/// General configuration
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub hack_mode_enabled: bool,
    pub flip_duration_ms: u64,
    pub grab_settle_ms: u64,
    /// `desaturate`, `fizzics` or `none`.
    pub default_shader: String,
    /// Flatpak ids of the companion app. Any one of them being installed is enough.
    pub companion_app_ids: Vec<String>,
    /// Flatpak installation roots, `~` is expanded.
    pub flatpak_installations: Vec<String>,
    pub log_level: String,
    /// Tables go last in the file.
    pub flip_to_hack: FlipToHack,

    #[serde(skip)]
    pub companion_found: bool,
}

/// Read the config file, or fall back to the defaults. Runs before logging is set up, so
/// problems go to stderr. The companion lookup is left to [`Config::with_companion_lookup`].
#[must_use]
pub fn load() -> Config {
    load_from_file()
        .map_err(|err| eprintln!("ERROR LOADING CONFIG: {err:?}"))
        .unwrap_or_default()
}

/// # Errors
///
/// Function will throw an error if `BaseDirectories` doesn't exist, if user doesn't have
/// permissions to place config.toml, if config.toml cannot be read (access writes, malformed file,
/// etc.).
/// Function can also error from inability to save config.toml (if it is the first time running
/// `codeview`).
fn load_from_file() -> Result<Config> {
    let path = BaseDirectories::with_prefix("codeview")?;
    let config_filename = path.place_config_file("config.toml")?;
    if Path::new(&config_filename).exists() {
        tracing::debug!("Config file '{}' found.", config_filename.display());
        read_config_file(&config_filename)
    } else {
        tracing::debug!("Config file not found. Using default config file.");
        let config = Config::default();
        write_to_file(&config_filename, &config)?;
        Ok(config)
    }
}

/// # Errors
///
/// Errors if the file cannot be read or is not a valid configuration.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// # Errors
///
/// Errors if the file cannot be created or written.
pub fn write_to_file(path: &Path, config: &Config) -> Result<()> {
    let toml = toml::to_string(config)?;
    let mut file = File::create(path)?;
    file.write_all(toml.as_bytes())?;
    Ok(())
}

/// Loads configuration from either specified file (preferred) or default.
///
/// # Errors
///
/// Errors if the file cannot be read, or if a path is given that does not exist.
pub fn check_config_file(fspath: Option<&str>) -> Result<Config> {
    let config_filename = match fspath {
        Some(fspath) => {
            let path = PathBuf::from(fspath);
            if !path.exists() {
                anyhow::bail!("Configuration file {} does not exist", path.display());
            }
            path
        }
        None => BaseDirectories::with_prefix("codeview")?.place_config_file("config.toml")?,
    };
    read_config_file(&config_filename)
}

impl Config {
    /// Look for the companion app in the configured installations.
    #[must_use]
    pub fn with_companion_lookup(mut self) -> Self {
        match self.find_companion() {
            Some(path) => {
                tracing::debug!("Companion app found at '{}'.", path.display());
                self.companion_found = true;
            }
            None => {
                tracing::info!("Companion app not installed, windows will not be paired");
                self.companion_found = false;
            }
        }
        self
    }

    /// Path of the first installed companion app.
    pub fn find_companion(&self) -> Option<PathBuf> {
        self.flatpak_installations.iter().find_map(|installation| {
            let root = PathBuf::from(shellexpand::tilde(installation).as_ref());
            self.companion_app_ids
                .iter()
                .map(|id| root.join("app").join(id))
                .find(|path| path.is_dir())
        })
    }

    fn shader(&self) -> Option<Shader> {
        Shader::resolve(Some(&self.default_shader), None)
    }
}

impl codeview_core::Config for Config {
    fn hack_mode_enabled(&self) -> bool {
        self.hack_mode_enabled
    }

    fn companion_installed(&self) -> bool {
        self.companion_found
    }

    fn is_blocked(&self, app_id: &str) -> bool {
        self.flip_to_hack.block_list.iter().any(|id| id == app_id)
    }

    fn is_allowed(&self, app_id: &str) -> bool {
        let allow_list = &self.flip_to_hack.allow_list;
        allow_list.is_empty() || allow_list.iter().any(|id| id == app_id)
    }

    fn flip_duration_ms(&self) -> u64 {
        self.flip_duration_ms
    }

    fn grab_settle_ms(&self) -> u64 {
        self.grab_settle_ms
    }

    fn default_shader(&self) -> Option<Shader> {
        self.shader()
    }
}
