//! Shared test utilities for warren-broker integration tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use warren_broker::CommandInvoker;
use warren_core::types::{
    BrokerSettings, CredentialDefaults, Ensure, ExchangeDecl, ManifestFile, RetryPolicy,
    RetryStrategy,
};
use warren_core::{Error, Result, WarrenConfig};

/// One recorded CLI invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

/// A scripted stand-in for the process boundary.
///
/// Responses are consumed in call order; the engine under test is strictly
/// sequential, so the order is deterministic.
#[derive(Default)]
pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation returning `stdout`
    pub fn push_ok(&self, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(stdout.to_string()));
    }

    /// Queue a failing invocation
    pub fn push_err(&self, code: i32, stderr: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(Error::process("scripted", code, stderr)));
    }

    /// All invocations seen so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations of a specific program
    pub fn calls_to(&self, program: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }
}

#[async_trait]
impl CommandInvoker for ScriptedInvoker {
    async fn invoke(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            env: env.to_vec(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted invocation: {} {}", program, args.join(" ")))
    }
}

/// Build a test manifest around the given declarations.
///
/// Retries are kept but delays are disabled so exhaustion tests run fast.
pub fn test_config(exchanges: Vec<ExchangeDecl>) -> WarrenConfig {
    WarrenConfig {
        manifest: ManifestFile {
            version: "1.0".to_string(),
            broker: BrokerSettings {
                retry: RetryPolicy {
                    max_attempts: 3,
                    strategy: RetryStrategy::None,
                    ..RetryPolicy::default()
                },
                ..BrokerSettings::default()
            },
            defaults: CredentialDefaults::default(),
            exchanges,
        },
        config_path: Utf8PathBuf::from("warren.yaml"),
        working_dir: Utf8PathBuf::from("."),
    }
}

/// A `ensure: present` declaration
pub fn decl_present(name: &str, kind: &str) -> ExchangeDecl {
    ExchangeDecl {
        name: name.to_string(),
        kind: Some(kind.to_string()),
        internal: false,
        durable: false,
        auto_delete: false,
        arguments: serde_json::Map::new(),
        ensure: Ensure::Present,
        user: None,
        password: None,
    }
}

/// An `ensure: absent` declaration
pub fn decl_absent(name: &str) -> ExchangeDecl {
    ExchangeDecl {
        name: name.to_string(),
        kind: None,
        internal: false,
        durable: false,
        auto_delete: false,
        arguments: serde_json::Map::new(),
        ensure: Ensure::Absent,
        user: None,
        password: None,
    }
}
