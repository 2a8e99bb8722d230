//! Read-only rabbitmqctl wrapper
//!
//! All reads route through the bounded retry policy because the broker's
//! management interface may be transiently unready (e.g. just after a node
//! restart). The mutation path in [`crate::admin`] deliberately has no such
//! wrapper; the asymmetry is structural.

use std::sync::Arc;

use camino::Utf8PathBuf;
use warren_core::retry::retry_with_policy;
use warren_core::types::{BrokerSettings, RetryPolicy};
use warren_core::{Error, Result};

use crate::invoker::CommandInvoker;

/// Prefix marking federation-internal exchanges in listing output
const FEDERATION_PREFIX: &str = "federation:";

/// Wrapper around the read-only broker CLI
pub struct RabbitCtl {
    invoker: Arc<dyn CommandInvoker>,
    ctl_path: Utf8PathBuf,
    home: Utf8PathBuf,
    retry: RetryPolicy,
}

impl RabbitCtl {
    /// Create a wrapper from broker settings
    pub fn new(invoker: Arc<dyn CommandInvoker>, settings: &BrokerSettings) -> Self {
        Self {
            invoker,
            ctl_path: settings.ctl_path.clone(),
            home: settings.home.clone(),
            retry: settings.retry.clone(),
        }
    }

    /// Check if the ctl binary is reachable
    pub fn check_installed(&self) -> bool {
        which::which(self.ctl_path.as_str()).is_ok()
    }

    /// List all virtual hosts on the cluster.
    ///
    /// One retried invocation, output split on newlines, no filtering.
    pub async fn list_vhosts(&self) -> Result<Vec<String>> {
        let args = vec!["-q".to_string(), "list_vhosts".to_string()];
        let stdout = self.read_with_retry(&args).await?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    /// List raw exchange lines for one vhost.
    ///
    /// Requests the ordered columns `name type internal durable auto_delete
    /// arguments`. Federation-internal exchanges are broker artifacts, not
    /// user resources, and are discarded here along with blank lines.
    pub async fn list_exchanges(&self, vhost: &str) -> Result<Vec<String>> {
        let args = vec![
            "-q".to_string(),
            "list_exchanges".to_string(),
            "-p".to_string(),
            vhost.to_string(),
            "name".to_string(),
            "type".to_string(),
            "internal".to_string(),
            "durable".to_string(),
            "auto_delete".to_string(),
            "arguments".to_string(),
        ];
        let stdout = self.read_with_retry(&args).await?;
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter(|line| !line.starts_with(FEDERATION_PREFIX))
            .map(str::to_string)
            .collect())
    }

    /// Run one read call under the retry policy.
    ///
    /// On exhaustion the last process error is wrapped (not masked) as
    /// [`Error::RetryExhausted`] and the whole discovery pass aborts.
    async fn read_with_retry(&self, args: &[String]) -> Result<String> {
        let env = [("HOME".to_string(), self.home.to_string())];
        retry_with_policy(&self.retry, || {
            self.invoker.invoke(self.ctl_path.as_str(), args, &env)
        })
        .await
        .map_err(Error::from_retry)
    }
}
