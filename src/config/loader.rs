//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Read the file
//! 2. JSON parsing into the raw shape
//! 3. Task validation, in file order
//! 4. Task map construction (keyed by lowercased name)
//! 5. URL prefix normalization
//! 6. Freeze with `Arc`

use crate::config::schema::{Config, RawConfig, task_key};
use crate::config::validation::Validator;
use crate::error::ConfigError;

use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<Config>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} at {location}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Loads a configuration file and returns the frozen configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`ConfigError::FileRead`])
/// - JSON parsing fails ([`ConfigError::ParseError`])
/// - Validation fails (any other [`ConfigError`] variant)
pub fn load(path: &Path) -> Result<LoadResult, ConfigError> {
    tracing::debug!(path = %path.display(), "loading configuration");

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    load_from_str(&content, path)
}

/// Loads a configuration from an in-memory JSON document.
///
/// `origin` is only used to label parse errors.
///
/// # Errors
///
/// Returns the same errors as [`load`], except [`ConfigError::FileRead`].
pub fn load_from_str(content: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let raw: RawConfig = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_path_buf(),
        line: (e.line() > 0).then_some(e.line()),
        message: e.to_string(),
    })?;

    build(raw)
}

/// Normalizes a URL prefix so that a non-empty prefix starts with `/`.
///
/// Idempotent: `"api"` and `"/api"` both become `"/api"`, and `""` stays
/// `""`.
#[must_use]
pub fn normalize_url_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    }
}

// ============================================================================
// Pipeline
// ============================================================================

fn build(mut raw: RawConfig) -> Result<LoadResult, ConfigError> {
    let raw_tasks = raw.tasks.take().unwrap_or_default();
    if raw_tasks.is_empty() {
        return Err(ConfigError::NoTasks);
    }

    let mut validator = Validator::new();
    validator.check_document(&raw);

    let mut tasks = IndexMap::with_capacity(raw_tasks.len());
    for (index, raw_task) in raw_tasks.into_iter().enumerate() {
        let task = raw_task.into_task();
        validator.validate_task(index, &task, &raw)?;

        let key = task_key(task.name());
        tracing::trace!(index, key = %key, "accepted task");
        if let Some(replaced) = tasks.get(&key) {
            validator.note_replaced(index, replaced, &task);
        }
        tasks.insert(key, task);
    }

    let config = Config {
        listen: raw.listen.unwrap_or_default(),
        real_ip_header: raw.real_ip_header.filter(|h| !h.is_empty()),
        external_ip: raw.external_ip,
        external_ipv6: raw.external_ipv6,
        url_prefix: normalize_url_prefix(raw.url_prefix.as_deref().unwrap_or_default()),
        allow_explicit_ips: raw.allow_explicit_ips.unwrap_or(false),
        tasks,
    };

    tracing::debug!(tasks = config.tasks.len(), "configuration loaded");

    Ok(LoadResult {
        config: Arc::new(config),
        warnings: validator.into_warnings(),
    })
}

// ============================================================================
// Tests
// ============================================================================
