//! CI runtime seam.
//!
//! The pipeline reads its credential, logs, publishes outputs and reports
//! failure only through [`ActionContext`]. [`GithubActions`] speaks the
//! GitHub Actions conventions; [`MemoryContext`] records everything in
//! memory for local runs and tests.

use crate::error::ActionError;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Narrow view of the CI runtime.
pub trait ActionContext {
    /// Value of a named action input, `None` when unset or blank.
    fn get_input(&self, name: &str) -> Option<String>;
    /// Mark the run as failed.
    fn report_failure(&self, message: &str);
    fn log_info(&self, message: &str);
    fn log_warning(&self, message: &str);
    fn log_error(&self, message: &str);
    /// Publish a named result for later pipeline steps.
    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError>;
}

// ─── GitHub Actions ──────────────────────────────────────────────────────────

/// GitHub Actions runtime: inputs from `INPUT_*`, outputs to `$GITHUB_OUTPUT`,
/// annotations as workflow commands on stdout.
#[derive(Debug, Clone, Default)]
pub struct GithubActions {
    output_file: Option<PathBuf>,
    annotate: bool,
}

impl GithubActions {
    pub fn new(output_file: Option<PathBuf>, annotate: bool) -> Self {
        Self {
            output_file,
            annotate,
        }
    }

    /// Read the runner environment. Annotations are only emitted inside a
    /// workflow (`GITHUB_ACTIONS=true`).
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let annotate = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
        Self::new(output_file, annotate)
    }

    fn annotation(&self, command: &str, message: &str) {
        if self.annotate {
            println!("::{}::{}", command, escape_data(message));
        }
    }
}

impl ActionContext for GithubActions {
    fn get_input(&self, name: &str) -> Option<String> {
        std::env::var(input_env_name(name))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn report_failure(&self, message: &str) {
        tracing::error!("{}", message);
        self.annotation("error", message);
    }

    fn log_info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn log_warning(&self, message: &str) {
        tracing::warn!("{}", message);
        self.annotation("warning", message);
    }

    fn log_error(&self, message: &str) {
        tracing::error!("{}", message);
        self.annotation("error", message);
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError> {
        let Some(path) = &self.output_file else {
            tracing::info!("output {}={}", name, value);
            return Ok(());
        };

        let write_err = |source| ActionError::Output {
            name: name.to_string(),
            path: path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(format_output(name, value).as_bytes())
            .map_err(write_err)
    }
}

/// `coingecko_token` → `INPUT_COINGECKO_TOKEN`.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// One `$GITHUB_OUTPUT` record. Multi-line values use the heredoc form.
fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("ghadelimiter_{:016x}", rand::random::<u64>());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Escape a workflow command message.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

// ─── In-memory ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// Records logs, outputs and failures instead of talking to a CI runtime.
#[derive(Debug, Default)]
pub struct MemoryContext {
    inputs: HashMap<String, String>,
    logs: Mutex<Vec<(LogLevel, String)>>,
    outputs: Mutex<Vec<(String, String)>>,
    failures: Mutex<Vec<String>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        lock(&self.logs)
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        lock(&self.outputs).clone()
    }

    pub fn failures(&self) -> Vec<String> {
        lock(&self.failures).clone()
    }

    fn push_log(&self, level: LogLevel, message: &str) {
        lock(&self.logs).push((level, message.to_string()));
    }
}

impl ActionContext for MemoryContext {
    fn get_input(&self, name: &str) -> Option<String> {
        self.inputs
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn report_failure(&self, message: &str) {
        lock(&self.failures).push(message.to_string());
    }

    fn log_info(&self, message: &str) {
        self.push_log(LogLevel::Info, message);
    }

    fn log_warning(&self, message: &str) {
        self.push_log(LogLevel::Warning, message);
    }

    fn log_error(&self, message: &str) {
        self.push_log(LogLevel::Error, message);
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError> {
        lock(&self.outputs).push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// A poisoned log is still a log.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
