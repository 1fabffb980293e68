use serde::Serialize;
use std::fmt;

/// What to do when cleaning or testing fails during ensure-and-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and report [`WorkflowOutcome::Suppressed`].
    #[default]
    BestEffort,
    /// Return the failure to the caller.
    Strict,
}

/// Stages of the workflow, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Probe,
    Install,
    RemoveArtifacts,
    Clean,
    Test,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Probe => "probe",
            Self::Install => "install",
            Self::RemoveArtifacts => "remove_artifacts",
            Self::Clean => "clean",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a workflow ended, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    Completed,
    /// A step failed and the failure was logged instead of raised.
    Suppressed {
        step: WorkflowStep,
        message: String,
        exit_code: Option<i32>,
    },
}

impl WorkflowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for WorkflowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Suppressed { step, message, .. } => {
                write!(f, "{} step failed (ignored): {}", step, message)
            }
        }
    }
}

/// Installed vs. configured revision, for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainStatus {
    pub configured_revision: String,
    pub installed_record: Option<String>,
    pub up_to_date: bool,
}

impl fmt::Display for ToolchainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "configured revision: {}", self.configured_revision)?;
        match &self.installed_record {
            Some(record) => writeln!(f, "installed:           {}", record)?,
            None => writeln!(f, "installed:           (not installed)")?,
        }
        write!(
            f,
            "up to date:          {}",
            if self.up_to_date { "yes" } else { "no" }
        )
    }
}
