//! Type definitions for Warren

mod exchange;
mod manifest;
mod plan;
mod retry_policy;

pub use exchange::{split_resource_name, ExchangeKey, ExchangeRecord};
pub use manifest::{
    BrokerSettings, CredentialDefaults, Credentials, Ensure, ExchangeDecl, ManifestFile,
};
pub use plan::{ActionType, PlannedAction, ReconcilePlan, ReconcileReport, ResourceOutcome};
pub use retry_policy::{RetryPolicy, RetryStrategy};
