//! CLI command implementations.

mod forge;

pub use forge::{forge_install, forge_test, status};

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use forge_workflow::{resolve, ToolConfig, UserConfig, WorkflowOrchestrator};
use process_runner::TokioProcessRunner;
use std::path::PathBuf;
use std::sync::Arc;

/// Global options shared by every command.
pub struct CommandContext {
    pub project_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load the project config and apply command-line overrides.
    fn tool_config(&self, revision: Option<String>, verbosity: Option<u32>) -> Result<ToolConfig> {
        let user = UserConfig::load(&self.project_dir, self.config_path.as_deref())
            .context("failed to load forge configuration")?
            .with_overrides(revision, verbosity);
        Ok(resolve(&user))
    }

    /// Orchestrator forwarding child output to this process's stdout/stderr.
    fn orchestrator(&self) -> WorkflowOrchestrator {
        WorkflowOrchestrator::new(Arc::new(TokioProcessRunner::new()), &self.project_dir)
    }
}
