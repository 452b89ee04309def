//! Error types for `taskgate`
//!
//! Configuration loading has exactly six failure outcomes, modelled by
//! [`ConfigError`]. [`TaskGateError`] wraps them together with the failures
//! the CLI itself can produce and maps every variant to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::IpFamily;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `taskgate` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid JSON, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `taskgate` operations.
#[derive(Debug, Error)]
pub enum TaskGateError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more configuration files failed validation.
    #[error("{count} file(s) failed validation")]
    ValidationFailed {
        /// Number of files that failed validation.
        count: usize,
    },

    /// A task was requested by a name the configuration does not define.
    #[error(
        "unknown task '{name}'{}",
        .suggestion.as_ref().map_or_else(String::new, |s| format!(", did you mean '{s}'?"))
    )]
    UnknownTask {
        /// Name as given on the command line
        name: String,
        /// Closest configured task key, if any is close enough
        suggestion: Option<String>,
    },
}

impl TaskGateError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::FileRead { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Json(_) | Self::ValidationFailed { .. } => {
                ExitCode::CONFIG_ERROR
            }
            Self::UnknownTask { .. } => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// Every variant is terminal for the load attempt: no partial configuration
/// is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read
    #[error("cannot read {}: {source}", .path.display())]
    FileRead {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed, the document has the wrong shape, or an IP
    /// literal could not be parsed
    #[error(
        "parse error in {}{}: {message}",
        .path.display(),
        .line.map_or_else(String::new, |l| format!(" (line {l})"))
    )]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// The task list is empty or absent
    #[error("no tasks set in config, there is nothing to do")]
    NoTasks,

    /// A task has an empty name
    #[error("task at tasks[{index}] has no name")]
    MissingTaskName {
        /// Position of the task in the `tasks` array
        index: usize,
    },

    /// A task name contains `/`
    #[error("task name '{name}' at tasks[{index}] cannot contain '/'")]
    InvalidTaskName {
        /// Position of the task in the `tasks` array
        index: usize,
        /// The offending name
        name: String,
    },

    /// A task uses `{serverIP}` for an address family whose server address
    /// is not configured
    #[error(
        "task '{task}' uses {{serverIP}} in an {family} command, but '{}' is not set",
        .family.config_field()
    )]
    MissingServerIp {
        /// Name of the task using the placeholder
        task: String,
        /// Address family of the offending template
        family: IpFamily,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `taskgate` operations.
pub type Result<T> = std::result::Result<T, TaskGateError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: TaskGateError = ConfigError::NoTasks.into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_file_read_error_exit_code() {
        let err: TaskGateError = ConfigError::FileRead {
            path: PathBuf::from("/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: TaskGateError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_unknown_task_exit_code() {
        let err = TaskGateError::UnknownTask {
            name: "wif".to_string(),
            suggestion: None,
        };
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
    }

    #[test]
    fn test_unknown_task_display_with_suggestion() {
        let err = TaskGateError::UnknownTask {
            name: "wif".to_string(),
            suggestion: Some("wifi".to_string()),
        };
        assert_eq!(err.to_string(), "unknown task 'wif', did you mean 'wifi'?");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("config.json"),
            line: Some(42),
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse error in config.json (line 42): expected value"
        );
    }

    #[test]
    fn test_parse_error_display_without_line() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("config.json"),
            line: None,
            message: "empty".to_string(),
        };
        assert_eq!(err.to_string(), "parse error in config.json: empty");
    }

    #[test]
    fn test_missing_server_ip_display_names_field() {
        let v4 = ConfigError::MissingServerIp {
            task: "wifi".to_string(),
            family: IpFamily::V4,
        };
        assert!(v4.to_string().contains("{serverIP}"));
        assert!(v4.to_string().contains("'external_ip'"));

        let v6 = ConfigError::MissingServerIp {
            task: "wifi".to_string(),
            family: IpFamily::V6,
        };
        assert!(v6.to_string().contains("'external_ipv6'"));
    }

    #[test]
    fn test_task_name_errors_carry_index() {
        let err = ConfigError::MissingTaskName { index: 3 };
        assert!(err.to_string().contains("tasks[3]"));

        let err = ConfigError::InvalidTaskName {
            index: 1,
            name: "a/b".to_string(),
        };
        assert!(err.to_string().contains("a/b"));
        assert!(err.to_string().contains("tasks[1]"));
    }

    #[test]
    fn test_file_read_error_keeps_source() {
        use std::error::Error as _;

        let err = ConfigError::FileRead {
            path: PathBuf::from("/etc/taskgate.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/etc/taskgate.json"));
        assert!(err.source().is_some());
    }
}
