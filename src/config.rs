//! Configuration system for the expedition roster
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (ROSTER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::roster::{RoleSet, DEFAULT_DATA_FILE, DEFAULT_ROLES};

/// File name looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "expedition-roster.toml";

/// Main roster configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Backing file location
    pub storage: StorageSettings,

    /// Roster rules
    pub roster: RosterSettings,

    /// Interactive loop settings
    pub repl: ReplSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding the roster
    pub data_file: String,
}

/// Roster rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSettings {
    /// Allowed role labels (matched case-insensitively)
    pub roles: Vec<String>,
}

/// Interactive loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplSettings {
    /// Prompt printed before each command
    pub prompt: String,

    /// Print the greeting line at startup
    pub banner: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            banner: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl RosterConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        let config_file = Self::find_config_file(config_path)?;
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from(LOCAL_CONFIG_FILE),
            dirs::config_dir()
                .map(|p| p.join("expedition-roster").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".expedition-roster").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Storage settings
        if let Some(val) = var("ROSTER_DATA_FILE") {
            self.storage.data_file = val;
        }

        // Roster settings (comma separated)
        if let Some(val) = var("ROSTER_ROLES") {
            self.roster.roles = val.split(',').map(|r| r.trim().to_string()).collect();
        }

        // Repl settings
        if let Some(val) = var("ROSTER_PROMPT") {
            self.repl.prompt = val;
        }
        if let Some(val) = var("ROSTER_BANNER") {
            self.repl.banner = parse_bool(&val);
        }

        // Logging settings
        if let Some(val) = var("ROSTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = var("ROSTER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Some(val) = var("ROSTER_LOG_JSON") {
            self.logging.json_format = parse_bool(&val);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_file = expand_path(&self.storage.data_file);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.storage.data_file.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_file",
                "data_file cannot be empty",
            ));
        }

        if self.roster.roles.is_empty() {
            return Err(Error::config_field_invalid(
                "roster.roles",
                "at least one role must be configured",
            ));
        }
        let mut seen: Vec<String> = Vec::new();
        for role in &self.roster.roles {
            let key = role.trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::config_field_invalid(
                    "roster.roles",
                    "role labels cannot be blank",
                ));
            }
            if seen.contains(&key) {
                return Err(Error::config_field_invalid(
                    "roster.roles",
                    format!("duplicate role '{}'", role.trim()),
                ));
            }
            seen.push(key);
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Role vocabulary built from `roster.roles`
    pub fn role_set(&self) -> RoleSet {
        RoleSet::new(&self.roster.roles)
    }

    /// Get the data file as a PathBuf
    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_file)
    }
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Expand ~ and environment variables in paths
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("expedition-roster")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }
    }

    fs::write(&config_path, generate_default_config())
        .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Expedition Roster Configuration

[storage]
# JSON file holding the roster (relative paths resolve against the working directory)
data_file = "members.json"

[roster]
# Allowed roles, matched case-insensitively and stored in lowercase
roles = ["штурман", "водитель", "грузчик", "механик"]

[repl]
# Prompt printed before each command
prompt = "> "

# Print the greeting line at startup
banner = true

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.expedition-roster/logs/roster.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
