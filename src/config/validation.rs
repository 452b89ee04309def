//! Configuration validation
//!
//! Task checks run in file order and stop at the first failure: the first
//! offending task is the one reported. Observations that do not make the
//! configuration unusable are collected as [`LoadWarning`]s instead.

use crate::config::loader::LoadWarning;
use crate::config::schema::{IpFamily, RawConfig, Task};
use crate::error::ConfigError;

/// Task name validator and warning collector.
#[derive(Debug, Default)]
pub struct Validator {
    warnings: Vec<LoadWarning>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks document-level fields that only produce warnings.
    pub fn check_document(&mut self, raw: &RawConfig) {
        if raw.listen.as_deref().is_none_or(str::is_empty) {
            self.add_warning("listen", "listen address is empty");
        }
    }

    /// Validates one task against the document it came from.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in this order:
    /// - [`ConfigError::MissingTaskName`] if the name is empty
    /// - [`ConfigError::InvalidTaskName`] if the name contains `/`
    /// - [`ConfigError::MissingServerIp`] if a template uses `{serverIP}`
    ///   for a family whose server address is not configured (IPv4 first)
    pub fn validate_task(
        &mut self,
        index: usize,
        task: &Task,
        raw: &RawConfig,
    ) -> Result<(), ConfigError> {
        validate_task_name(index, task.name())?;

        for family in IpFamily::ALL {
            if task.uses_server_ip(family) && raw.server_ip(family).is_none() {
                return Err(ConfigError::MissingServerIp {
                    task: task.name().to_string(),
                    family,
                });
            }
        }

        if !task.has_commands() {
            self.add_warning(
                &format!("tasks[{index}]"),
                &format!("task '{}' defines no commands", task.name()),
            );
        }

        Ok(())
    }

    /// Records that the task at `index` replaced an earlier task whose name
    /// differs only in case.
    pub fn note_replaced(&mut self, index: usize, replaced: &Task, by: &Task) {
        self.add_warning(
            &format!("tasks[{index}].name"),
            &format!(
                "task '{}' replaces earlier task '{}' (task names are case-insensitive)",
                by.name(),
                replaced.name()
            ),
        );
    }

    /// Consumes the validator and returns the collected warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<LoadWarning> {
        self.warnings
    }

    fn add_warning(&mut self, location: &str, message: &str) {
        tracing::debug!(location, "{message}");
        self.warnings.push(LoadWarning {
            message: message.to_string(),
            location: Some(location.to_string()),
        });
    }
}

/// Checks that a task name is usable as a URL path segment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingTaskName`] for an empty name and
/// [`ConfigError::InvalidTaskName`] for a name containing `/`.
pub fn validate_task_name(index: usize, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::MissingTaskName { index });
    }
    if name.contains('/') {
        return Err(ConfigError::InvalidTaskName {
            index,
            name: name.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
