//! Manifest types for warren.yaml

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::exchange::ExchangeKey;
use super::retry_policy::RetryPolicy;

/// Root warren.yaml manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Manifest schema version (e.g., "1.0")
    pub version: String,

    /// Broker CLI settings
    #[serde(default)]
    pub broker: BrokerSettings,

    /// Credential defaults applied to exchanges without their own
    #[serde(default)]
    pub defaults: CredentialDefaults,

    /// Declared exchange resources, in declaration order
    #[serde(default)]
    pub exchanges: Vec<ExchangeDecl>,
}

/// Settings for the two broker CLIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSettings {
    /// Path to the rabbitmqctl binary
    #[serde(default = "default_ctl_path")]
    pub ctl_path: Utf8PathBuf,

    /// Path to the rabbitmqadmin binary
    #[serde(default = "default_admin_path")]
    pub admin_path: Utf8PathBuf,

    /// Admin configuration file passed verbatim to rabbitmqadmin via `-c`
    #[serde(default = "default_admin_conf")]
    pub admin_conf: Utf8PathBuf,

    /// Isolated HOME for spawned CLIs, so they cannot pick up a caller's
    /// credential files (e.g. ~/.erlang.cookie overrides)
    #[serde(default = "default_home")]
    pub home: Utf8PathBuf,

    /// Retry policy for read-path CLI calls
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_ctl_path() -> Utf8PathBuf {
    Utf8PathBuf::from("rabbitmqctl")
}

fn default_admin_path() -> Utf8PathBuf {
    Utf8PathBuf::from("/usr/local/bin/rabbitmqadmin")
}

fn default_admin_conf() -> Utf8PathBuf {
    Utf8PathBuf::from("/etc/rabbitmq/rabbitmqadmin.conf")
}

fn default_home() -> Utf8PathBuf {
    Utf8PathBuf::from("/tmp")
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            ctl_path: default_ctl_path(),
            admin_path: default_admin_path(),
            admin_conf: default_admin_conf(),
            home: default_home(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Default credentials for mutation calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialDefaults {
    /// Management user
    #[serde(default = "default_user")]
    pub user: String,

    /// Management password
    #[serde(default = "default_user")]
    pub password: String,
}

fn default_user() -> String {
    "guest".to_string()
}

impl Default for CredentialDefaults {
    fn default() -> Self {
        Self {
            user: default_user(),
            password: default_user(),
        }
    }
}

/// Resolved credentials for one mutation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Desired presence of a declared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// The exchange should exist
    #[default]
    Present,
    /// The exchange should not exist
    Absent,
}

/// One declared exchange resource
///
/// Declared records are owned by the manifest and read-only to the
/// reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeDecl {
    /// Exchange identifier, `local@vhost` or bare form
    pub name: String,

    /// Exchange type; required when ensure is `present`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Internal flag
    #[serde(default)]
    pub internal: bool,

    /// Durability flag
    #[serde(default)]
    pub durable: bool,

    /// Auto-delete flag
    #[serde(default)]
    pub auto_delete: bool,

    /// Exchange arguments
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,

    /// Desired presence
    #[serde(default)]
    pub ensure: Ensure,

    /// Per-resource credential override
    #[serde(default)]
    pub user: Option<String>,

    /// Per-resource credential override
    #[serde(default)]
    pub password: Option<String>,
}

impl ExchangeDecl {
    /// Derive the composite key from the declared identifier.
    ///
    /// Callers derive this once per record per pass and reuse the result.
    pub fn key(&self) -> ExchangeKey {
        ExchangeKey::from_resource_name(&self.name)
    }

    /// Resolve credentials against manifest-level defaults
    pub fn credentials(&self, defaults: &CredentialDefaults) -> Credentials {
        Credentials {
            user: self.user.clone().unwrap_or_else(|| defaults.user.clone()),
            password: self
                .password
                .clone()
                .unwrap_or_else(|| defaults.password.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_settings_defaults() {
        let settings = BrokerSettings::default();
        assert_eq!(settings.ctl_path, "rabbitmqctl");
        assert_eq!(settings.admin_path, "/usr/local/bin/rabbitmqadmin");
        assert_eq!(settings.admin_conf, "/etc/rabbitmq/rabbitmqadmin.conf");
        assert_eq!(settings.home, "/tmp");
    }

    #[test]
    fn test_decl_minimal_yaml() {
        let decl: ExchangeDecl = serde_yaml_ng::from_str("name: logs@/\ntype: topic\n").unwrap();
        assert_eq!(decl.name, "logs@/");
        assert_eq!(decl.kind.as_deref(), Some("topic"));
        assert_eq!(decl.ensure, Ensure::Present);
        assert!(!decl.durable);
        assert!(decl.arguments.is_empty());
    }

    #[test]
    fn test_decl_key_derivation() {
        let decl: ExchangeDecl = serde_yaml_ng::from_str("name: logs@prod\n").unwrap();
        let key = decl.key();
        assert_eq!(key.name, "logs");
        assert_eq!(key.vhost.as_deref(), Some("prod"));
    }

    #[test]
    fn test_credentials_fall_back_to_defaults() {
        let decl: ExchangeDecl =
            serde_yaml_ng::from_str("name: logs@/\nuser: admin\n").unwrap();
        let creds = decl.credentials(&CredentialDefaults::default());
        assert_eq!(creds.user, "admin");
        assert_eq!(creds.password, "guest");
    }

    #[test]
    fn test_ensure_absent_yaml() {
        let decl: ExchangeDecl =
            serde_yaml_ng::from_str("name: old@/\nensure: absent\n").unwrap();
        assert_eq!(decl.ensure, Ensure::Absent);
        assert_eq!(decl.kind, None);
    }
}
