//! Plan command

use std::sync::Arc;

use anyhow::Result;
use camino::Utf8Path;
use warren_broker::{ProcessInvoker, Reconciler};
use warren_core::WarrenConfig;

use crate::cli::PlanArgs;
use crate::output;

pub async fn run(_args: PlanArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = WarrenConfig::load(config)?;
    let engine = Reconciler::new(config, Arc::new(ProcessInvoker::new()));

    let (discovered, plan) = engine.plan().await?;

    output::header("Reconciliation plan");
    output::info(&format!(
        "{} declared, {} discovered",
        engine.declared().len(),
        discovered.len()
    ));

    if plan.is_empty() {
        output::success("Nothing to do");
        return Ok(());
    }

    for action in &plan.actions {
        output::kv(&action.key.id(), &action.description);
    }
    output::info(&format!(
        "{} to create, {} to delete",
        plan.creates().count(),
        plan.deletes().count()
    ));

    Ok(())
}
