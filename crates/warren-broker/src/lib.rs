//! # warren-broker
//!
//! Everything that touches the two RabbitMQ CLIs:
//! - [`invoker`] - process execution boundary (the dependency-injection seam)
//! - [`ctl`] - read-only `rabbitmqctl` wrapper, retried
//! - [`admin`] - mutating `rabbitmqadmin` wrapper, never retried
//! - [`parse`] - exchange listing parser, including the argument-column repair
//! - [`discovery`] - full discovered-state snapshot across all vhosts
//! - [`matcher`] - pure declared-vs-discovered matching
//! - [`reconciler`] - one reconciliation pass: discover, match, mutate

pub mod admin;
pub mod ctl;
pub mod discovery;
pub mod invoker;
pub mod matcher;
pub mod parse;
pub mod reconciler;

pub use admin::RabbitAdmin;
pub use ctl::RabbitCtl;
pub use discovery::{discover_all, DiscoveredState};
pub use invoker::{CommandInvoker, ProcessInvoker};
pub use matcher::build_plan;
pub use reconciler::Reconciler;
