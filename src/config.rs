use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "./bundle-publish.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".bundle-publish.toml";

/// Represents the complete configuration for bundle-publish.
///
/// Holds the project paths the flows touch and the external commands they call.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Project file-system locations, relative to the working directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_lockfile")]
    pub lockfile: String,

    #[serde(default = "default_dependencies")]
    pub dependencies: String,

    #[serde(default = "default_dist")]
    pub dist: String,

    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_docs")]
    pub docs: String,
}

fn default_lockfile() -> String {
    "./package-lock.json".to_string()
}

fn default_dependencies() -> String {
    "./node_modules".to_string()
}

fn default_dist() -> String {
    "./dist".to_string()
}

fn default_manifest() -> String {
    "./package.json".to_string()
}

fn default_docs() -> String {
    "./README.md".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            lockfile: default_lockfile(),
            dependencies: default_dependencies(),
            dist: default_dist(),
            manifest: default_manifest(),
            docs: default_docs(),
        }
    }
}

/// External tools invoked by the flows.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_install")]
    pub install: String,

    #[serde(default = "default_build")]
    pub build: String,

    #[serde(default = "default_publisher")]
    pub publisher: String,

    #[serde(default = "default_docs_generator")]
    pub docs_generator: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_install() -> String {
    "npm install".to_string()
}

fn default_build() -> String {
    "npm run build".to_string()
}

fn default_publisher() -> String {
    "np".to_string()
}

fn default_docs_generator() -> String {
    "doxdox".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            install: default_install(),
            build: default_build(),
            publisher: default_publisher(),
            docs_generator: default_docs_generator(),
            remote: default_remote(),
        }
    }
}

/// Paths and commands resolved once at flow start.
///
/// File names are derived from the configured paths so log lines can name
/// the file without its directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lockfile_path: String,
    pub dependencies_path: String,
    pub dist_path: String,
    pub manifest_path: String,
    pub manifest_file_name: String,
    pub docs_path: String,
    pub docs_file_name: String,
    pub commands: CommandsConfig,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        let paths = &config.paths;
        Settings {
            lockfile_path: paths.lockfile.clone(),
            dependencies_path: paths.dependencies.clone(),
            dist_path: paths.dist.clone(),
            manifest_path: paths.manifest.clone(),
            manifest_file_name: file_name(&paths.manifest),
            docs_path: paths.docs.clone(),
            docs_file_name: file_name(&paths.docs),
            commands: config.commands.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from_config(&Config::default())
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bundle-publish.toml` in current directory
/// 3. `.bundle-publish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let (source, config_str) = if let Some(path) = config_path {
        (path.to_string(), read_config_file(path)?)
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        (
            LOCAL_CONFIG_FILE.to_string(),
            read_config_file(LOCAL_CONFIG_FILE)?,
        )
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            let display = user_path.display().to_string();
            let contents = read_config_file(&display)?;
            (display, contents)
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    log::debug!("loading configuration from {}", source);
    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("invalid config {}: {}", source, e)))
}

fn read_config_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path, e)))
}
