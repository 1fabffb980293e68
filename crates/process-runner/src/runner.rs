use crate::{CommandSpec, OutputSink, OutputWriter, ProcessError, StdioSink};
use async_trait::async_trait;
use std::process::ExitStatus;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outcome of a command that exited with code 0.
///
/// Output is not part of the result; it has already been forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
}

/// Runs external commands to completion.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command, forwarding stdout and stderr live.
    ///
    /// Resolves iff the process exits with code 0.
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessResult, ProcessError>;

    /// Run a command and return its stdout; stderr is still forwarded.
    ///
    /// Same exit-code contract as [`ProcessRunner::run`].
    async fn capture(&self, spec: &CommandSpec) -> Result<String, ProcessError>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
#[derive(Clone)]
pub struct TokioProcessRunner {
    sink: Arc<dyn OutputSink>,
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioProcessRunner {
    /// Runner forwarding to this process's stdout and stderr.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(StdioSink))
    }

    pub fn with_sink(sink: Arc<dyn OutputSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessResult, ProcessError> {
        info!(command = %spec, working_dir = ?spec.working_dir(), "Running command");

        let mut child = spec.to_command().spawn().map_err(|source| ProcessError::Spawn {
            program: spec.program().to_string(),
            source,
        })?;
        debug!(pid = ?child.id(), "Process spawned");

        let stdout_task = child
            .stdout
            .take()
            .map(|pipe| forward(pipe, self.sink.stdout(), "stdout"));
        let stderr_task = child
            .stderr
            .take()
            .map(|pipe| forward(pipe, self.sink.stderr(), "stderr"));

        let status = child.wait().await?;

        // Drain both pipes so nothing printed before exit is lost.
        join_forwarder(stdout_task).await;
        join_forwarder(stderr_task).await;

        check_status(spec, status).map(|exit_code| ProcessResult { exit_code })
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<String, ProcessError> {
        debug!(command = %spec, "Capturing command output");

        let mut child = spec.to_command().spawn().map_err(|source| ProcessError::Spawn {
            program: spec.program().to_string(),
            source,
        })?;

        let stdout_task = child.stdout.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut buffer = Vec::new();
                pipe.read_to_end(&mut buffer).await.map(|_| buffer)
            })
        });
        let stderr_task = child
            .stderr
            .take()
            .map(|pipe| forward(pipe, self.sink.stderr(), "stderr"));

        let status = child.wait().await?;

        let stdout = match stdout_task {
            Some(task) => match task.await {
                Ok(read) => read?,
                Err(err) => {
                    warn!(error = %err, "stdout reader task failed");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        join_forwarder(stderr_task).await;

        check_status(spec, status)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn forward<R>(mut reader: R, mut writer: OutputWriter, stream: &'static str) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = tokio::io::copy(&mut reader, &mut writer).await {
            warn!(stream, error = %err, "Failed to forward process output");
        }
        let _ = writer.flush().await;
    })
}

async fn join_forwarder(task: Option<JoinHandle<()>>) {
    if let Some(task) = task {
        if let Err(err) = task.await {
            warn!(error = %err, "Output forwarding task failed");
        }
    }
}

fn check_status(spec: &CommandSpec, status: ExitStatus) -> Result<i32, ProcessError> {
    match status.code() {
        Some(0) => {
            debug!(command = %spec, "Command succeeded");
            Ok(0)
        }
        Some(exit_code) => {
            warn!(command = %spec, exit_code, "Command failed");
            Err(ProcessError::Execution {
                command: spec.to_string(),
                exit_code,
            })
        }
        None => {
            warn!(command = %spec, "Command terminated by signal");
            Err(ProcessError::Terminated {
                command: spec.to_string(),
            })
        }
    }
}
