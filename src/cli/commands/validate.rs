//! `validate` command
//!
//! Loads each configuration file and reports whether it is usable.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{self, LoadWarning};
use crate::error::TaskGateError;

/// Outcome of validating a single file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path as given on the command line
    pub path: String,
    /// Whether the file passed validation
    pub valid: bool,
    /// Number of distinct tasks, when the file loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<usize>,
    /// Load warnings
    pub warnings: Vec<String>,
    /// Load error, when the file failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals across all validated files.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Files checked
    pub total: usize,
    /// Files that passed
    pub valid: usize,
    /// Files that failed
    pub invalid: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate configuration files.
///
/// Every file is checked even after a failure, so one run reports all
/// broken files.
///
/// # Errors
///
/// Returns [`TaskGateError::ValidationFailed`] if any file failed, or a
/// JSON error if the report cannot be serialized.
pub fn run(args: &ValidateArgs) -> Result<(), TaskGateError> {
    let files: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| validate_file(path, args.strict))
        .collect();

    let invalid = files.iter().filter(|f| !f.valid).count();
    let summary = Summary {
        total: files.len(),
        valid: files.len() - invalid,
        invalid,
    };

    match args.format {
        OutputFormat::Human => print_human(&files, &summary),
        OutputFormat::Json => {
            let report = Report { files, summary };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if invalid > 0 {
        return Err(TaskGateError::ValidationFailed { count: invalid });
    }
    Ok(())
}

/// Loads one file and turns the outcome into a report entry.
///
/// With `strict`, a file that loads with warnings is reported invalid.
#[must_use]
pub fn validate_file(path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating configuration");

    match config::load(path) {
        Ok(result) => {
            log_warnings(path, &result.warnings);
            let valid = !strict || result.warnings.is_empty();
            FileReport {
                path: path.display().to_string(),
                valid,
                tasks: Some(result.config.tasks().len()),
                warnings: result.warnings.iter().map(ToString::to_string).collect(),
                error: (!valid).then(|| "warnings are errors in strict mode".to_string()),
            }
        }
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "configuration invalid");
            FileReport {
                path: path.display().to_string(),
                valid: false,
                tasks: None,
                warnings: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn log_warnings(path: &Path, warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            file = %path.display(),
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}

fn print_human(files: &[FileReport], summary: &Summary) {
    for file in files {
        match (&file.error, file.tasks) {
            (Some(error), _) => println!("FAIL {}: {error}", file.path),
            (None, Some(tasks)) => {
                println!(
                    "ok   {} ({tasks} task(s), {} warning(s))",
                    file.path,
                    file.warnings.len()
                );
            }
            (None, None) => println!("ok   {}", file.path),
        }
    }
    println!(
        "{} file(s) checked, {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    );
}
