//! Mutating rabbitmqadmin wrapper
//!
//! Mutations are issued exactly once per pass. A failed create or destroy
//! is reported back per-resource and never retried here; the next
//! reconciliation pass is the retry.

use std::sync::Arc;

use camino::Utf8PathBuf;
use warren_core::types::{BrokerSettings, Credentials, ExchangeDecl, ExchangeKey};
use warren_core::{Error, Result};

use crate::invoker::CommandInvoker;

/// Wrapper around the mutation CLI
pub struct RabbitAdmin {
    invoker: Arc<dyn CommandInvoker>,
    admin_path: Utf8PathBuf,
    admin_conf: Utf8PathBuf,
    home: Utf8PathBuf,
}

impl RabbitAdmin {
    /// Create a wrapper from broker settings
    pub fn new(invoker: Arc<dyn CommandInvoker>, settings: &BrokerSettings) -> Self {
        Self {
            invoker,
            admin_path: settings.admin_path.clone(),
            admin_conf: settings.admin_conf.clone(),
            home: settings.home.clone(),
        }
    }

    /// Check if the admin binary is reachable
    pub fn check_installed(&self) -> bool {
        which::which(self.admin_path.as_str()).is_ok()
    }

    /// Declare an exchange.
    ///
    /// Attribute tokens are emitted only for truthy declared values;
    /// omitting `internal=false` and friends matches the tool's defaults.
    /// The `--vhost` option is omitted when the key carries no vhost, in
    /// which case the cluster's default vhost applies.
    pub async fn declare_exchange(
        &self,
        key: &ExchangeKey,
        decl: &ExchangeDecl,
        creds: &Credentials,
    ) -> Result<()> {
        let kind = decl
            .kind
            .as_deref()
            .ok_or_else(|| Error::missing_field(format!("exchanges[{}].type", decl.name)))?;

        let mut args = vec!["declare".to_string(), "exchange".to_string()];
        self.push_scope(&mut args, key, creds);
        args.push(format!("name={}", key.name));
        args.push(format!("type={}", kind));
        if decl.internal {
            args.push("internal=true".to_string());
        }
        if decl.durable {
            args.push("durable=true".to_string());
        }
        if decl.auto_delete {
            args.push("auto_delete=true".to_string());
        }
        args.push(format!(
            "arguments={}",
            serde_json::Value::Object(decl.arguments.clone())
        ));
        args.push("-c".to_string());
        args.push(self.admin_conf.to_string());

        self.mutate(&args).await
    }

    /// Delete an exchange
    pub async fn delete_exchange(&self, key: &ExchangeKey, creds: &Credentials) -> Result<()> {
        let mut args = vec!["delete".to_string(), "exchange".to_string()];
        self.push_scope(&mut args, key, creds);
        args.push(format!("name={}", key.name));
        args.push("-c".to_string());
        args.push(self.admin_conf.to_string());

        self.mutate(&args).await
    }

    /// Vhost scoping plus credentials, shared by both mutation forms
    fn push_scope(&self, args: &mut Vec<String>, key: &ExchangeKey, creds: &Credentials) {
        if let Some(vhost) = &key.vhost {
            args.push(format!("--vhost={}", vhost));
        }
        args.push(format!("--user={}", creds.user));
        args.push(format!("--password={}", creds.password));
    }

    /// One un-retried invocation of the mutation CLI
    async fn mutate(&self, args: &[String]) -> Result<()> {
        let env = [("HOME".to_string(), self.home.to_string())];
        self.invoker
            .invoke(self.admin_path.as_str(), args, &env)
            .await?;
        Ok(())
    }
}
