//! # Forge Workflow
//!
//! The two user-facing operations of hardhat-forge:
//!
//! - **ensure-and-test**: install the configured forge revision if it is
//!   missing, clear `hardhat-artifacts`, then run `forge clean` and
//!   `forge test --hardhat`.
//! - **force-install**: reinstall the configured revision unconditionally.
//!
//! ```text
//! Start ─► Probing ─┬─► Installing ─┐
//!                   └───────────────┴─► Cleaning ─► Clean-running ─► Test-running ─► Done
//! ```
//!
//! Steps run strictly one after another over a shared
//! [`process_runner::ProcessRunner`]. Failures from cleaning onward are
//! handled by the configured [`FailurePolicy`].

mod config;
mod error;
mod orchestrator;
mod types;

pub use config::{
    resolve, ForgeUserConfig, ToolConfig, UserConfig, CONFIG_FILE_NAME, DEFAULT_FORGE_VERSION,
    DEFAULT_VERBOSITY,
};
pub use error::{ConfigError, WorkflowError};
pub use forge_toolchain::ToolchainError;
pub use orchestrator::{WorkflowOrchestrator, ARTIFACTS_DIR, FORGE_OUT_DIR};
pub use types::{FailurePolicy, ToolchainStatus, WorkflowOutcome, WorkflowStep};
