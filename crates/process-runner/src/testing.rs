//! In-memory [`ProcessRunner`] for exercising callers without spawning.

use crate::{CommandSpec, MemorySink, OutputSink, ProcessError, ProcessResult, ProcessRunner};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;

/// What a scripted command does when invoked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReply {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub spawn_fails: bool,
}

impl ScriptedReply {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn exit(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub fn spawn_failure() -> Self {
        Self {
            spawn_fails: true,
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Records every command and replays scripted replies.
///
/// Replies are matched by prefix against the rendered command line
/// (`program arg1 arg2`); the first matching rule wins and unmatched
/// commands succeed silently.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, ScriptedReply)>,
    calls: Mutex<Vec<CommandSpec>>,
    sink: MemorySink,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, prefix: impl Into<String>, reply: ScriptedReply) -> Self {
        self.rules.push((prefix.into(), reply));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }

    /// Output "forwarded" by scripted commands.
    pub fn sink(&self) -> &MemorySink {
        &self.sink
    }

    async fn replay(&self, spec: &CommandSpec, forward_stdout: bool) -> Result<String, ProcessError> {
        self.calls.lock().push(spec.clone());

        let rendered = spec.to_string();
        let reply = self
            .rules
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_default();

        if reply.spawn_fails {
            return Err(ProcessError::Spawn {
                program: spec.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted spawn failure"),
            });
        }

        if forward_stdout {
            self.sink.stdout().write_all(reply.stdout.as_bytes()).await?;
        }
        self.sink.stderr().write_all(reply.stderr.as_bytes()).await?;

        if reply.exit_code != 0 {
            return Err(ProcessError::Execution {
                command: rendered,
                exit_code: reply.exit_code,
            });
        }

        Ok(reply.stdout)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessResult, ProcessError> {
        self.replay(spec, true).await?;
        Ok(ProcessResult { exit_code: 0 })
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<String, ProcessError> {
        self.replay(spec, false).await
    }
}
