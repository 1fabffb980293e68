//! Installed-revision detection.
//!
//! `cargo install --list` prints one package header per installed crate,
//! followed by the binaries it provides:
//!
//! ```text
//! foundry-cli v0.1.0 (https://github.com/gakonst/foundry?rev=ecdafc5#ecdafc5a):
//!     cast
//!     forge
//! ```
//!
//! The probe finds the `forge` entry and walks back to the nearest header
//! naming the source package. That header (whitespace removed) is the
//! installed revision record.

use crate::executables::resolve_cargo_executable;
use crate::{ToolchainError, FORGE_BIN, SOURCE_PACKAGE};
use process_runner::{CommandSpec, ProcessRunner};
use std::sync::Arc;
use tracing::debug;

/// Reads which revision of the toolchain cargo has installed.
#[derive(Clone)]
pub struct VersionProbe {
    runner: Arc<dyn ProcessRunner>,
    cargo: String,
}

impl VersionProbe {
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

    pub fn list_command(&self) -> CommandSpec {
        CommandSpec::new(&self.cargo).args(["install", "--list"])
    }

    /// The installed record for `forge`, or `None` when it is not installed.
    ///
    /// A failing `cargo install --list` is an error, never "not installed".
    pub async fn installed_revision(&self) -> Result<Option<String>, ToolchainError> {
        let output = self
            .runner
            .capture(&self.list_command())
            .await
            .map_err(ToolchainError::Query)?;

        let record = find_installed_revision(&output, FORGE_BIN, SOURCE_PACKAGE);
        debug!(record = ?record, "Probed installed forge revision");
        Ok(record)
    }

    pub async fn is_revision_installed(&self, target: &str) -> Result<bool, ToolchainError> {
        let installed = self.installed_revision().await?;
        Ok(installed.is_some_and(|record| revision_matches(&record, target)))
    }
}

/// Extract the install record for `bin_name` from `cargo install --list` output.
///
/// Lines are compared with all whitespace removed. The last line equal to
/// `bin_name` anchors the search, which then moves toward the start of the
/// output and returns the first line containing `package`.
pub fn find_installed_revision(output: &str, bin_name: &str, package: &str) -> Option<String> {
    let mut raw: Vec<&str> = output.split('\n').collect();
    if raw.last().is_some_and(|line| line.is_empty()) {
        raw.pop();
    }

    let lines: Vec<String> = raw.into_iter().map(strip_whitespace).collect();
    let anchor = lines.iter().rposition(|line| line == bin_name)?;

    lines[..anchor]
        .iter()
        .rev()
        .find(|line| line.contains(package))
        .cloned()
}

/// True when `installed` contains `target`, ignoring case.
///
/// Accepts both full commit hashes and short prefixes.
pub fn revision_matches(installed: &str, target: &str) -> bool {
    installed
        .to_lowercase()
        .contains(&target.to_lowercase())
}

fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use process_runner::testing::{ScriptedReply, ScriptedRunner};

    const INTERLEAVED: &str = "cargo\nv0.1\nforge\nfoundry-cli abcdef\nforge\n";

    const CARGO_LIST: &str = "\
cargo-edit v0.11.9:
    cargo-add
    cargo-rm
foundry-cli v0.1.0 (https://github.com/gakonst/foundry?rev=ecdafc5#ecdafc5a1b2c3d4e):
    cast
    forge
ripgrep v14.1.0:
    rg
";

    #[test]
    fn interleaved_output_returns_nearest_package_line() {
        assert_eq!(
            find_installed_revision(INTERLEAVED, FORGE_BIN, SOURCE_PACKAGE),
            Some("foundry-cliabcdef".to_string())
        );
    }

    #[test]
    fn real_cargo_listing_returns_stripped_header() {
        assert_eq!(
            find_installed_revision(CARGO_LIST, FORGE_BIN, SOURCE_PACKAGE),
            Some(
                "foundry-cliv0.1.0(https://github.com/gakonst/foundry?rev=ecdafc5#ecdafc5a1b2c3d4e):"
                    .to_string()
            )
        );
    }

    #[test]
    fn missing_bin_line_is_absent() {
        let output = "ripgrep v14.1.0:\n    rg\nfoundry-cli v0.1.0:\n    cast\n";
        assert_eq!(find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE), None);
    }

    #[test]
    fn bin_name_only_matches_whole_line() {
        let output = "foundry-cli abc:\n    forge-fmt\n";
        assert_eq!(find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE), None);
    }

    #[test]
    fn no_package_line_before_bin_is_absent() {
        let output = "forge\nfoundry-cli abcdef\n";
        assert_eq!(find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE), None);
    }

    #[test]
    fn bin_installed_from_other_package_is_absent() {
        let output = "forge-std v1.0.0:\n    forge\n";
        assert_eq!(find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE), None);
    }

    #[test]
    fn empty_output_is_absent() {
        assert_eq!(find_installed_revision("", FORGE_BIN, SOURCE_PACKAGE), None);
        assert_eq!(find_installed_revision("\n", FORGE_BIN, SOURCE_PACKAGE), None);
    }

    #[test]
    fn output_without_trailing_newline_still_parses() {
        let output = "foundry-cli v0.1.0 (rev abcdef):\n    forge";
        assert_eq!(
            find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE),
            Some("foundry-cliv0.1.0(revabcdef):".to_string())
        );
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let output = "foundry-cli v0.1.0 (rev abcdef):\r\n    forge\r\n";
        assert_eq!(
            find_installed_revision(output, FORGE_BIN, SOURCE_PACKAGE),
            Some("foundry-cliv0.1.0(revabcdef):".to_string())
        );
    }

    #[test]
    fn revision_matching_ignores_case() {
        assert!(revision_matches("foundry-cliabcdef", "ABCDEF"));
        assert!(revision_matches("foundry-cliABCDEF", "abcdef"));
        assert!(revision_matches("foundry-cliabcdef", "abc"));
        assert!(!revision_matches("foundry-cliabcdef", "999999"));
    }

    fn probe(runner: ScriptedRunner) -> (VersionProbe, Arc<ScriptedRunner>) {
        let runner = Arc::new(runner);
        let probe = VersionProbe::new(runner.clone()).with_cargo("cargo");
        (probe, runner)
    }

    #[tokio::test]
    async fn probe_runs_cargo_install_list() {
        let (probe, runner) =
            probe(ScriptedRunner::new().on("cargo install --list", ScriptedReply::stdout(INTERLEAVED)));

        let record = probe.installed_revision().await.unwrap();

        assert_eq!(record.as_deref(), Some("foundry-cliabcdef"));
        assert_eq!(runner.rendered_calls(), vec!["cargo install --list"]);
    }

    #[tokio::test]
    async fn probe_checks_revision_against_listing() {
        let (probe, _) =
            probe(ScriptedRunner::new().on("cargo install --list", ScriptedReply::stdout(INTERLEAVED)));

        assert!(probe.is_revision_installed("abcdef").await.unwrap());
        assert!(probe.is_revision_installed("ABCDEF").await.unwrap());
        assert!(!probe.is_revision_installed("999999").await.unwrap());
    }

    #[tokio::test]
    async fn not_installed_is_false() {
        let (probe, _) = probe(
            ScriptedRunner::new().on("cargo install --list", ScriptedReply::stdout("ripgrep v14.1.0:\n    rg\n")),
        );
        assert!(!probe.is_revision_installed("ecdafc5").await.unwrap());
    }

    #[tokio::test]
    async fn failing_query_is_a_hard_error() {
        let (probe, _) =
            probe(ScriptedRunner::new().on("cargo install --list", ScriptedReply::exit(1)));

        let err = probe.is_revision_installed("ecdafc5").await.unwrap_err();
        assert!(matches!(err, ToolchainError::Query(_)));
        assert_eq!(err.exit_code(), Some(1));
    }

    #[tokio::test]
    async fn missing_cargo_is_a_query_error() {
        let (probe, _) =
            probe(ScriptedRunner::new().on("cargo", ScriptedReply::spawn_failure()));

        let err = probe.installed_revision().await.unwrap_err();
        assert!(matches!(err, ToolchainError::Query(_)));
    }
}
