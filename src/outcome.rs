//! Per-iteration result, classified without printing anything.

use std::io;

use serde::Serialize;

use crate::executor::ProcessOutput;
use crate::filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchFailure {
    /// Program not found on `PATH`.
    NotFound,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// Exit code zero, with the highlight lines scraped from stdout.
    Success { highlights: Vec<String> },
    /// Endpoint variable unset; nothing was spawned.
    ConfigError { variable: String },
    /// Non-zero exit or killed by a signal (`code == None`).
    ProcessError {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The program could not be started at all.
    LaunchError {
        program: String,
        kind: LaunchFailure,
        message: String,
    },
}

impl IterationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IterationOutcome::Success { .. })
    }

    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            IterationOutcome::Success { .. } => "success",
            IterationOutcome::ConfigError { .. } => "config_error",
            IterationOutcome::ProcessError { .. } => "process_error",
            IterationOutcome::LaunchError { .. } => "launch_error",
        }
    }
}

/// Turn the raw result of spawning `program` into an outcome.
pub fn classify(program: &str, result: io::Result<ProcessOutput>) -> IterationOutcome {
    match result {
        Ok(out) if out.success() => IterationOutcome::Success {
            highlights: filter::highlights(&out.stdout),
        },
        Ok(out) => IterationOutcome::ProcessError {
            code: out.code,
            stdout: out.stdout,
            stderr: out.stderr,
        },
        Err(e) => IterationOutcome::LaunchError {
            program: program.to_string(),
            kind: match e.kind() {
                io::ErrorKind::NotFound => LaunchFailure::NotFound,
                _ => LaunchFailure::Other,
            },
            message: e.to_string(),
        },
    }
}
