//! forge-test, forge-install, and status.

use super::CommandContext;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use forge_workflow::{FailurePolicy, WorkflowOutcome};
use tracing::info;

/// Ensure the configured revision is installed, then clean and test.
pub async fn forge_test(
    ctx: &CommandContext,
    revision: Option<String>,
    verbosity: Option<u32>,
    strict: bool,
) -> Result<()> {
    let config = ctx.tool_config(revision, verbosity)?;
    let policy = if strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::BestEffort
    };
    info!(revision = %config.version, verbosity = config.verbosity, ?policy, "forge-test");

    let outcome = ctx
        .orchestrator()
        .with_policy(policy)
        .ensure_and_test(&config)
        .await?;

    report(&outcome, &ctx.format);
    Ok(())
}

/// Reinstall the configured revision. Install failures do not fail the command.
pub async fn forge_install(ctx: &CommandContext, revision: Option<String>) -> Result<()> {
    let config = ctx.tool_config(revision, None)?;
    info!(revision = %config.version, "forge-install");

    let outcome = ctx.orchestrator().force_install(&config).await;

    report(&outcome, &ctx.format);
    Ok(())
}

/// Print installed vs. configured revision.
pub async fn status(ctx: &CommandContext, revision: Option<String>) -> Result<()> {
    let config = ctx.tool_config(revision, None)?;
    let status = ctx.orchestrator().status(&config).await?;
    output::print(&status, &ctx.format);
    Ok(())
}

/// Suppressed failures are warned about in both formats; JSON mode also
/// prints the outcome itself on stdout.
fn report(outcome: &WorkflowOutcome, format: &OutputFormat) {
    if let WorkflowOutcome::Suppressed { .. } = outcome {
        output::print_warning(&outcome.to_string(), format);
    }
    if let OutputFormat::Json = format {
        output::print(outcome, format);
    }
}
