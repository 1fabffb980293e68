//! # Forge Toolchain
//!
//! Knows how the forge toolchain is installed through cargo.
//!
//! ## Key Operations
//!
//! | Item | Description |
//! |------|-------------|
//! | [`VersionProbe::installed_revision`] | Read the installed record from `cargo install --list` |
//! | [`VersionProbe::is_revision_installed`] | Case-insensitive revision containment check |
//! | [`ToolInstaller::install`] | `cargo install --git ... --locked --rev <rev> [--force]` |
//! | [`find_installed_revision`] | Pure parser behind the probe |
//!
//! Both components share one [`process_runner::ProcessRunner`], so they can be
//! driven by a scripted runner in tests.

mod error;
mod executables;
mod installer;
mod probe;

pub use error::ToolchainError;
pub use executables::{resolve_cargo_executable, resolve_forge_executable};
pub use installer::ToolInstaller;
pub use probe::{find_installed_revision, revision_matches, VersionProbe};

/// Upstream repository the toolchain is built from.
pub const FOUNDRY_GIT_URL: &str = "https://github.com/gakonst/foundry";

/// Binary installed from [`FOUNDRY_GIT_URL`].
pub const FORGE_BIN: &str = "forge";

/// Cargo package that provides [`FORGE_BIN`].
pub const SOURCE_PACKAGE: &str = "foundry-cli";
