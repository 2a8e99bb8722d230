//! # warren-core
//!
//! Core library for the Warren CLI providing:
//! - Manifest file parsing (warren.yaml)
//! - Type definitions for exchange resources, plans, and reports
//! - Retry execution engine with policy-based configuration

pub mod config;
pub mod error;
pub mod retry;
pub mod types;

pub use config::WarrenConfig;
pub use error::{Error, Result};
