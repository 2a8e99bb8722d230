//! Reconciliation plan and report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::exchange::ExchangeKey;

/// Mutation kinds the engine can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Delete,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Delete => write!(f, "delete"),
        }
    }
}

/// One planned mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    /// Action type
    pub action: ActionType,

    /// Resolved key of the affected exchange (derived once per pass)
    pub key: ExchangeKey,

    /// Description
    pub description: String,
}

/// The declared-vs-discovered delta for one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// Actions to take, in declaration order
    pub actions: Vec<PlannedAction>,
}

impl ReconcilePlan {
    /// True when the pass has nothing to mutate
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Planned creates
    pub fn creates(&self) -> impl Iterator<Item = &PlannedAction> {
        self.actions
            .iter()
            .filter(|a| a.action == ActionType::Create)
    }

    /// Planned deletes
    pub fn deletes(&self) -> impl Iterator<Item = &PlannedAction> {
        self.actions
            .iter()
            .filter(|a| a.action == ActionType::Delete)
    }
}

/// Per-resource result of a mutation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceOutcome {
    /// Affected exchange
    pub key: ExchangeKey,

    /// What was attempted
    pub action: ActionType,

    /// Whether the mutation CLI call succeeded
    pub success: bool,

    /// Failure detail when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one full reconciliation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Number of exchanges in the discovered snapshot
    pub discovered: usize,

    /// Per-resource mutation outcomes, in plan order
    pub outcomes: Vec<ResourceOutcome>,

    /// When the pass started
    pub started_at: DateTime<Utc>,

    /// When the pass finished
    pub finished_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// True when every attempted mutation succeeded
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    /// Failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}
