//! Sequential composition of probe, install, clean, and test.

use crate::{FailurePolicy, ToolConfig, ToolchainStatus, WorkflowError, WorkflowOutcome, WorkflowStep};
use forge_toolchain::{resolve_forge_executable, ToolInstaller, VersionProbe};
use process_runner::{CommandSpec, ProcessRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Host artifact directory cleared before each test run.
pub const ARTIFACTS_DIR: &str = "hardhat-artifacts";

/// Output directory handed to `forge test --out`.
pub const FORGE_OUT_DIR: &str = "forge-artifacts";

/// Drives the ensure-and-test and force-install workflows for one project.
pub struct WorkflowOrchestrator {
    runner: Arc<dyn ProcessRunner>,
    probe: VersionProbe,
    installer: ToolInstaller,
    forge: String,
    project_root: PathBuf,
    policy: FailurePolicy,
}

impl WorkflowOrchestrator {
    pub fn new(runner: Arc<dyn ProcessRunner>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            probe: VersionProbe::new(Arc::clone(&runner)),
            installer: ToolInstaller::new(Arc::clone(&runner)),
            forge: resolve_forge_executable(),
            runner,
            project_root: project_root.into(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use explicit `cargo` and `forge` executables instead of the
    /// environment-resolved ones.
    pub fn with_executables(mut self, cargo: impl Into<String>, forge: impl Into<String>) -> Self {
        let cargo = cargo.into();
        self.probe = self.probe.with_cargo(cargo.clone());
        self.installer = self.installer.with_cargo(cargo);
        self.forge = forge.into();
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn clean_command(&self) -> CommandSpec {
        CommandSpec::new(&self.forge)
            .arg("clean")
            .current_dir(&self.project_root)
    }

    pub fn test_command(&self, verbosity: u32) -> CommandSpec {
        CommandSpec::new(&self.forge)
            .args(["test", "--hardhat", "--force", "--out", FORGE_OUT_DIR, "--verbosity"])
            .arg(verbosity.to_string())
            .current_dir(&self.project_root)
    }

    /// Install the configured revision if missing, then clean and test.
    ///
    /// Only a failing installed-revision probe is returned as an error
    /// under [`FailurePolicy::BestEffort`]. A failed install is logged and
    /// the run continues against whatever toolchain is present.
    pub async fn ensure_and_test(&self, config: &ToolConfig) -> Result<WorkflowOutcome, WorkflowError> {
        info!(revision = %config.version, "Checking installed forge revision");

        let installed = self
            .probe
            .is_revision_installed(&config.version)
            .await
            .map_err(WorkflowError::Probe)?;

        if installed {
            info!(revision = %config.version, "Forge revision already installed");
        } else {
            info!(revision = %config.version, "Forge revision not installed");
            if let Err(err) = self.installer.install(&config.version, false).await {
                error!(
                    revision = %config.version,
                    exit_code = ?err.exit_code(),
                    error = %err,
                    "Failed to install forge"
                );
                error!("Forge installation failed, continuing with the current toolchain");
            }
        }

        match self.clean_and_test(config).await {
            Ok(()) => {
                info!("Forge test run finished");
                Ok(WorkflowOutcome::Completed)
            }
            Err(err) => match self.policy {
                FailurePolicy::Strict => Err(err),
                FailurePolicy::BestEffort => {
                    warn!(
                        step = %err.step(),
                        exit_code = ?err.exit_code(),
                        error = %err,
                        "Forge test run failed, not propagating"
                    );
                    Ok(WorkflowOutcome::Suppressed {
                        step: err.step(),
                        message: err.to_string(),
                        exit_code: err.exit_code(),
                    })
                }
            },
        }
    }

    /// Reinstall the configured revision with `--force`.
    ///
    /// Never fails from the caller's point of view; errors are logged and
    /// reported through the outcome.
    pub async fn force_install(&self, config: &ToolConfig) -> WorkflowOutcome {
        info!(revision = %config.version, "Force-installing forge");

        match self.installer.install(&config.version, true).await {
            Ok(()) => {
                info!(revision = %config.version, "Forge force-install finished");
                WorkflowOutcome::Completed
            }
            Err(err) => {
                error!(
                    revision = %config.version,
                    exit_code = ?err.exit_code(),
                    error = %err,
                    "Forge force-install failed"
                );
                WorkflowOutcome::Suppressed {
                    step: WorkflowStep::Install,
                    message: err.to_string(),
                    exit_code: err.exit_code(),
                }
            }
        }
    }

    /// Compare the installed record with the configured revision.
    pub async fn status(&self, config: &ToolConfig) -> Result<ToolchainStatus, WorkflowError> {
        let installed_record = self
            .probe
            .installed_revision()
            .await
            .map_err(WorkflowError::Probe)?;

        let up_to_date = installed_record
            .as_deref()
            .is_some_and(|record| forge_toolchain::revision_matches(record, &config.version));

        Ok(ToolchainStatus {
            configured_revision: config.version.clone(),
            installed_record,
            up_to_date,
        })
    }

    async fn clean_and_test(&self, config: &ToolConfig) -> Result<(), WorkflowError> {
        self.remove_artifacts().await?;
        self.run_step(WorkflowStep::Clean, &self.clean_command()).await?;
        self.run_step(WorkflowStep::Test, &self.test_command(config.verbosity))
            .await
    }

    async fn run_step(&self, step: WorkflowStep, spec: &CommandSpec) -> Result<(), WorkflowError> {
        debug!(%step, command = %spec, "Running workflow step");
        self.runner
            .run(spec)
            .await
            .map(|_| ())
            .map_err(|source| WorkflowError::Process { step, source })
    }

    /// `rm -rf <root>/hardhat-artifacts`.
    async fn remove_artifacts(&self) -> Result<(), WorkflowError> {
        let path = self.project_root.join(ARTIFACTS_DIR);
        let cleanup_error = |source| WorkflowError::ArtifactCleanup {
            path: path.clone(),
            source,
        };

        let metadata = match tokio::fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No artifact directory to remove");
                return Ok(());
            }
            Err(err) => return Err(cleanup_error(err)),
        };

        let removed = if metadata.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };

        match removed {
            Ok(()) => {
                debug!(path = %path.display(), "Removed artifact directory");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(cleanup_error(err)),
        }
    }
}
