//! Process execution boundary
//!
//! The [`CommandInvoker`] trait is the single seam between the engine and
//! the outside world: the reconciler is a plain value constructed with an
//! invoker, so tests substitute a scripted one and production uses
//! [`ProcessInvoker`]. No retry and no parsing happen here.

use async_trait::async_trait;
use tracing::debug;
use warren_core::{Error, Result};

/// Runs an external command and returns its captured standard output.
///
/// `env` entries are applied on top of the inherited environment; callers
/// pass an isolated `HOME` here so the spawned CLI cannot read credential
/// files from the invoking user's home directory.
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    /// Invoke `program` with `args`, returning captured stdout.
    ///
    /// A non-zero exit or an unspawnable executable surfaces as
    /// [`Error::Process`] carrying the exit code and captured stderr.
    async fn invoke(&self, program: &str, args: &[String], env: &[(String, String)])
        -> Result<String>;
}

/// Production invoker backed by `tokio::process::Command`.
///
/// Each invocation blocks the calling flow until the child exits. There is
/// no per-invocation timeout; the read-path retry bound is the only time
/// bound. TODO: add an overall timeout per call once the manifest grows a
/// setting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Create a new process invoker
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<String> {
        debug!("Running: {} {}", program, args.join(" "));

        let output = tokio::process::Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| Error::process(program, -1, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::process(
                program,
                output.status.code().unwrap_or(-1),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
