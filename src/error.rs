//! Error types for the expedition roster
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-facing messages shown after `ERR: ` in the REPL
//! - Hints for fatal startup errors
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // Storage errors (2xx)
    StorageRead = 200,
    StorageWrite = 201,
    StorageParse = 202,
    IoPermission = 203,

    // Validation errors (3xx)
    InvalidRole = 300,
    InvalidName = 301,
    DuplicateName = 302,
    MemberNotFound = 310,

    // Command syntax errors (4xx)
    CommandUsage = 400,
    UnknownCommand = 401,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // Storage errors
            300..=399 => 30, // Validation errors
            400..=499 => 40, // Command errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the roster
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// Backing file could not be read
    #[error("ошибка чтения файла данных")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file is not a sequence of member records
    #[error("ошибка чтения файла данных")]
    StorageParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Backing file could not be written
    #[error("не удалось сохранить файл данных: {path}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────

    /// Role is not part of the configured role set
    #[error("роль должна быть одной из: {}", .allowed.join(", "))]
    InvalidRole { role: String, allowed: Vec<String> },

    /// Name has the wrong length or characters
    #[error("имя должно быть {min}–{max} символов (буквы, пробел, дефис)")]
    InvalidName { name: String, min: usize, max: usize },

    /// A member with the same name (ignoring case) already exists
    #[error("такое имя уже существует")]
    DuplicateName { name: String },

    /// No member with this name
    #[error("запись с именем \"{name}\" не найдена")]
    MemberNotFound { name: String },

    // ─────────────────────────────────────────────────────────────
    // Command Errors
    // ─────────────────────────────────────────────────────────────

    /// Known command with the wrong arguments
    #[error("используйте: {usage}")]
    CommandUsage { usage: &'static str },

    /// Unrecognized command word
    #[error("unknown command")]
    UnknownCommand { command: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::StorageRead { .. } => ErrorCode::StorageRead,
            Error::StorageParse { .. } => ErrorCode::StorageParse,
            Error::StorageWrite { .. } => ErrorCode::StorageWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::StorageRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::InvalidRole { .. } => ErrorCode::InvalidRole,
            Error::InvalidName { .. } => ErrorCode::InvalidName,
            Error::DuplicateName { .. } => ErrorCode::DuplicateName,
            Error::MemberNotFound { .. } => ErrorCode::MemberNotFound,

            Error::CommandUsage { .. } => ErrorCode::CommandUsage,
            Error::UnknownCommand { .. } => ErrorCode::UnknownCommand,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Validation failures the user can fix by retyping the command
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidRole { .. } | Error::InvalidName { .. } | Error::DuplicateName { .. }
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'expedition-roster config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'expedition-roster config validate' to see details."
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::StorageRead { .. } | Error::StorageParse { .. } => Some(
                "The data file is unreadable or not a JSON array of {name, role} records. Fix or remove it."
            ),
            Error::StorageWrite { .. } => Some(
                "Check that the data file's directory exists and is writable."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// The offending input or file, if the error carries one
    pub fn subject(&self) -> Option<String> {
        match self {
            Error::ConfigNotFound { path }
            | Error::StorageRead { path, .. }
            | Error::StorageParse { path, .. }
            | Error::StorageWrite { path, .. } => Some(path.display().to_string()),
            Error::InvalidRole { role, .. } => Some(role.clone()),
            Error::InvalidName { name, .. }
            | Error::DuplicateName { name }
            | Error::MemberNotFound { name } => Some(name.clone()),
            Error::UnknownCommand { command } => Some(command.clone()),
            _ => None,
        }
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        match self.subject() {
            Some(subject) => format!("[{}] {} ({})", code.as_str(), self, subject),
            None => format!("[{}] {}", code.as_str(), self),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a member not found error
    pub fn member_not_found(name: impl Into<String>) -> Self {
        Error::MemberNotFound { name: name.into() }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
