//! Declared-vs-discovered matching
//!
//! Pure functions, no I/O. Reconciliation is existence-only: a declared
//! exchange found present is satisfied even when its attributes drifted,
//! matching the behavior of the administrative tooling this replaces.

use std::collections::HashMap;

use warren_core::types::{
    ActionType, Ensure, ExchangeDecl, ExchangeKey, ExchangeRecord, PlannedAction, ReconcilePlan,
};

use crate::discovery::DiscoveredState;

/// Build the mutation plan for one pass.
///
/// Keys are derived from each declaration once, here; the plan carries the
/// resolved key so mutation never re-derives it. Identical inputs always
/// produce identical plans, and an empty plan leaves the next pass's
/// discovery unchanged.
pub fn build_plan(declared: &[ExchangeDecl], discovered: &DiscoveredState) -> ReconcilePlan {
    let index: HashMap<&ExchangeKey, &ExchangeRecord> =
        discovered.records.iter().map(|r| (&r.key, r)).collect();

    let mut actions = Vec::new();
    for decl in declared {
        let key = decl.key();
        let present = index.get(&key).map(|r| r.present).unwrap_or(false);

        match (decl.ensure, present) {
            (Ensure::Present, false) => actions.push(PlannedAction {
                action: ActionType::Create,
                description: format!("declare exchange {}", key),
                key,
            }),
            (Ensure::Absent, true) => actions.push(PlannedAction {
                action: ActionType::Delete,
                description: format!("delete exchange {}", key),
                key,
            }),
            // Present and wanted, or absent and unwanted: nothing to do
            _ => {}
        }
    }

    ReconcilePlan { actions }
}
