use process_runner::ProcessError;
use thiserror::Error;

/// Errors from probing or installing the toolchain.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to list installed binaries: {0}")]
    Query(#[source] ProcessError),

    #[error("failed to install forge at revision {revision}: {source}")]
    Install {
        revision: String,
        #[source]
        source: ProcessError,
    },

    #[error("invalid revision: {0:?}")]
    InvalidRevision(String),
}

impl ToolchainError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Query(_) => "query_failed",
            Self::Install { .. } => "install_failed",
            Self::InvalidRevision(_) => "invalid_revision",
        }
    }

    /// Exit code of the underlying cargo process, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Query(source) | Self::Install { source, .. } => source.exit_code(),
            Self::InvalidRevision(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_error_exposes_cargo_exit_code() {
        let err = ToolchainError::Install {
            revision: "deadbeef".into(),
            source: ProcessError::Execution {
                command: "cargo install".into(),
                exit_code: 101,
            },
        };
        assert_eq!(err.exit_code(), Some(101));
        assert_eq!(err.code(), "install_failed");
        assert!(err.to_string().contains("deadbeef"));
    }

    #[test]
    fn invalid_revision_has_no_exit_code() {
        let err = ToolchainError::InvalidRevision("  ".into());
        assert_eq!(err.exit_code(), None);
    }
}
