//! The reconciliation engine
//!
//! A [`Reconciler`] is a plain value constructed from a manifest and a
//! command invoker; there is no global registry. One `apply` call runs one
//! full pass: discover, match, mutate. Discovery failures abort the pass
//! before any mutation is issued; mutation failures are collected
//! per-resource and left for the next pass.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use warren_core::types::{
    ActionType, ExchangeDecl, ExchangeKey, ReconcilePlan, ReconcileReport, ResourceOutcome,
};
use warren_core::{Result, WarrenConfig};

use crate::admin::RabbitAdmin;
use crate::ctl::RabbitCtl;
use crate::discovery::{discover_all, DiscoveredState};
use crate::invoker::CommandInvoker;
use crate::matcher::build_plan;

/// Reconciles the manifest's declared exchanges against a live cluster
pub struct Reconciler {
    config: WarrenConfig,
    ctl: RabbitCtl,
    admin: RabbitAdmin,
}

impl Reconciler {
    /// Create an engine from a loaded manifest and an invoker
    pub fn new(config: WarrenConfig, invoker: Arc<dyn CommandInvoker>) -> Self {
        let ctl = RabbitCtl::new(invoker.clone(), config.broker());
        let admin = RabbitAdmin::new(invoker, config.broker());
        Self { config, ctl, admin }
    }

    /// Declared exchange resources, in manifest order
    pub fn declared(&self) -> &[ExchangeDecl] {
        self.config.exchanges()
    }

    /// Broker CLI binaries that cannot be found on this host
    pub fn missing_binaries(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.ctl.check_installed() {
            missing.push(self.config.broker().ctl_path.to_string());
        }
        if !self.admin.check_installed() {
            missing.push(self.config.broker().admin_path.to_string());
        }
        missing
    }

    /// Produce the discovered-state snapshot for one pass.
    ///
    /// Exposed so callers can prefetch or display current state without
    /// mutating anything.
    pub async fn discover(&self) -> Result<DiscoveredState> {
        discover_all(&self.ctl).await
    }

    /// Discover and match without mutating
    pub async fn plan(&self) -> Result<(DiscoveredState, ReconcilePlan)> {
        let discovered = self.discover().await?;
        let plan = build_plan(self.declared(), &discovered);
        Ok((discovered, plan))
    }

    /// Run one full reconciliation pass
    pub async fn apply(&self) -> Result<ReconcileReport> {
        let started_at = Utc::now();

        let (discovered, plan) = self.plan().await?;
        if plan.is_empty() {
            info!(
                "nothing to do: {} declared, {} discovered",
                self.declared().len(),
                discovered.len()
            );
        }

        let by_key: HashMap<ExchangeKey, &ExchangeDecl> = self
            .declared()
            .iter()
            .map(|decl| (decl.key(), decl))
            .collect();

        let mut outcomes = Vec::new();
        for action in &plan.actions {
            // The plan was built from this declared set, so the key resolves
            let decl = by_key[&action.key];
            let creds = self.config.credentials_for(decl);

            let result = match action.action {
                ActionType::Create => self.admin.declare_exchange(&action.key, decl, &creds).await,
                ActionType::Delete => self.admin.delete_exchange(&action.key, &creds).await,
            };

            match result {
                Ok(()) => {
                    info!("{} exchange {}", action.action, action.key);
                    outcomes.push(ResourceOutcome {
                        key: action.key.clone(),
                        action: action.action,
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("failed to {} exchange {}: {}", action.action, action.key, e);
                    outcomes.push(ResourceOutcome {
                        key: action.key.clone(),
                        action: action.action,
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(ReconcileReport {
            discovered: discovered.len(),
            outcomes,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
