//! External process execution behind a trait, so the runner can be driven
//! by a scripted executor in tests.

use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use crate::command::Invocation;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Anything that can run an [`Invocation`] to completion.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Run the command, wait for it to exit, and return both captured streams.
    /// Spawn failures (missing binary, permissions) surface as `io::Error`.
    async fn execute(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput>;
}

/// Spawns the real program with stdin detached and both streams captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForgeExecutor;

#[async_trait]
impl ScriptExecutor for ForgeExecutor {
    async fn execute(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
        debug!(program = %invocation.program, args = ?invocation.args, "spawning");

        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
