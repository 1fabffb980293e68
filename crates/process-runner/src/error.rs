use thiserror::Error;

/// Error taxonomy for external process execution.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {exit_code}")]
    Execution { command: String, exit_code: i32 },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("I/O error while running process: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn_failed",
            Self::Execution { .. } => "non_zero_exit",
            Self::Terminated { .. } => "terminated",
            Self::Io(_) => "io_error",
        }
    }

    /// Exit code of the failed process, when it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_carries_exit_code() {
        let err = ProcessError::Execution {
            command: "forge test".into(),
            exit_code: 101,
        };
        assert_eq!(err.exit_code(), Some(101));
        assert_eq!(err.code(), "non_zero_exit");
        assert_eq!(err.to_string(), "`forge test` exited with code 101");
    }

    #[test]
    fn spawn_error_has_no_exit_code() {
        let err = ProcessError::Spawn {
            program: "forge".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), None);
        assert!(err.to_string().contains("forge"));
    }
}
