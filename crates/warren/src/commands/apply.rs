//! Apply command

use std::sync::Arc;

use anyhow::Result;
use camino::Utf8Path;
use warren_broker::{ProcessInvoker, Reconciler};
use warren_core::WarrenConfig;

use crate::cli::ApplyArgs;
use crate::output;

pub async fn run(args: ApplyArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = WarrenConfig::load(config)?;

    output::header(&format!(
        "Reconciling {} declared exchanges",
        config.exchanges().len()
    ));
    if config.exchanges().is_empty() {
        output::warning("Manifest declares no exchanges");
    }

    let engine = Reconciler::new(config, Arc::new(ProcessInvoker::new()));

    // Preflight: both CLIs must be reachable before touching the cluster
    let missing = engine.missing_binaries();
    if !missing.is_empty() {
        output::error("Missing broker CLIs:");
        for bin in &missing {
            output::kv(bin, "not found");
        }
        return Err(anyhow::anyhow!("Prerequisites not satisfied"));
    }

    if args.dry_run {
        let (discovered, plan) = engine.plan().await?;
        output::info(&format!("Discovered {} exchanges", discovered.len()));
        if plan.is_empty() {
            output::success("Nothing to do");
            return Ok(());
        }
        output::info("Dry run - would execute:");
        for action in &plan.actions {
            output::kv(&action.key.id(), &action.description);
        }
        return Ok(());
    }

    let spinner = output::spinner("Reconciling...");
    let report = engine.apply().await?;
    spinner.finish_and_clear();

    for outcome in &report.outcomes {
        if outcome.success {
            output::success(&format!("{} {}", outcome.action, outcome.key));
        } else {
            output::error(&format!(
                "{} {} failed: {}",
                outcome.action,
                outcome.key,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    if report.outcomes.is_empty() {
        output::success(&format!(
            "Already in sync ({} exchanges discovered)",
            report.discovered
        ));
    }

    if report.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} mutations failed",
            report.failures().count(),
            report.outcomes.len()
        ))
    }
}
