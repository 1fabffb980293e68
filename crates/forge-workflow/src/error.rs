use crate::WorkflowStep;
use forge_toolchain::ToolchainError;
use process_runner::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The installed-revision check could not run.
    #[error("could not determine installed forge revision: {0}")]
    Probe(#[source] ToolchainError),

    #[error("failed to remove {}: {source}", .path.display())]
    ArtifactCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} step failed: {source}")]
    Process {
        step: WorkflowStep,
        #[source]
        source: ProcessError,
    },
}

impl WorkflowError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Probe(_) => "probe_failed",
            Self::ArtifactCleanup { .. } => "artifact_cleanup_failed",
            Self::Process { .. } => "step_failed",
        }
    }

    pub fn step(&self) -> WorkflowStep {
        match self {
            Self::Probe(_) => WorkflowStep::Probe,
            Self::ArtifactCleanup { .. } => WorkflowStep::RemoveArtifacts,
            Self::Process { step, .. } => *step,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Probe(source) => source.exit_code(),
            Self::ArtifactCleanup { .. } => None,
            Self::Process { source, .. } => source.exit_code(),
        }
    }
}

/// Errors loading the project configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "config_io",
            Self::Json { .. } => "config_json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_error_reports_step_and_code() {
        let err = WorkflowError::Process {
            step: WorkflowStep::Test,
            source: ProcessError::Execution {
                command: "forge test".into(),
                exit_code: 1,
            },
        };
        assert_eq!(err.step(), WorkflowStep::Test);
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(err.to_string(), "test step failed: `forge test` exited with code 1");
    }

    #[test]
    fn cleanup_error_mentions_path() {
        let err = WorkflowError::ArtifactCleanup {
            path: PathBuf::from("/project/hardhat-artifacts"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.code(), "artifact_cleanup_failed");
        assert!(err.to_string().contains("/project/hardhat-artifacts"));
    }
}
