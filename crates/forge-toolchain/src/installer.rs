//! Source installs of the toolchain through `cargo install --git`.

use crate::executables::resolve_cargo_executable;
use crate::{ToolchainError, FORGE_BIN, FOUNDRY_GIT_URL};
use process_runner::{CommandSpec, ProcessRunner};
use std::sync::Arc;
use tracing::info;

/// Builds and installs a pinned revision of forge.
///
/// One attempt per call; retrying is the caller's decision.
#[derive(Clone)]
pub struct ToolInstaller {
    runner: Arc<dyn ProcessRunner>,
    cargo: String,
}

impl ToolInstaller {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            cargo: resolve_cargo_executable(),
        }
    }

    pub fn with_cargo(mut self, cargo: impl Into<String>) -> Self {
        self.cargo = cargo.into();
        self
    }

    pub fn install_command(&self, revision: &str, force: bool) -> CommandSpec {
        let spec = CommandSpec::new(&self.cargo).args([
            "install",
            "--git",
            FOUNDRY_GIT_URL,
            "--bin",
            FORGE_BIN,
            "--locked",
            "--rev",
            revision,
        ]);

        if force {
            spec.arg("--force")
        } else {
            spec
        }
    }

    /// Install `revision`, streaming cargo's output live.
    pub async fn install(&self, revision: &str, force: bool) -> Result<(), ToolchainError> {
        let revision = revision.trim();
        if revision.is_empty() {
            return Err(ToolchainError::InvalidRevision(revision.to_string()));
        }

        info!(revision, force, "Installing forge from source");

        self.runner
            .run(&self.install_command(revision, force))
            .await
            .map_err(|source| ToolchainError::Install {
                revision: revision.to_string(),
                source,
            })?;

        info!(revision, "Forge installed");
        Ok(())
    }
}
