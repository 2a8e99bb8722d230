//! Exchange identity and record types

use serde::{Deserialize, Serialize};

/// Split a declared resource name into its local and vhost parts.
///
/// The externally visible identifier is `local@vhost`; a bare name carries
/// no vhost and the cluster's default vhost applies at the CLI level. Only
/// the first `@` separates the parts, so a vhost containing `@` survives.
pub fn split_resource_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once('@') {
        Some((local, vhost)) => (local, Some(vhost)),
        None => (name, None),
    }
}

/// Composite identity of an exchange: local name plus owning vhost.
///
/// `name` may legitimately be empty (the broker's default exchange). A
/// `None` vhost means the identifier was declared without an `@vhost` part;
/// discovered records always carry a concrete vhost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeKey {
    /// Local exchange name, unique within a vhost
    pub name: String,

    /// Owning virtual host
    pub vhost: Option<String>,
}

impl ExchangeKey {
    /// Create a key from explicit parts
    pub fn new(name: impl Into<String>, vhost: Option<String>) -> Self {
        Self {
            name: name.into(),
            vhost,
        }
    }

    /// Derive a key from a declared `local@vhost` (or bare) identifier
    pub fn from_resource_name(name: &str) -> Self {
        let (local, vhost) = split_resource_name(name);
        Self {
            name: local.to_string(),
            vhost: vhost.map(str::to_string),
        }
    }

    /// Recompose the externally visible identifier
    pub fn id(&self) -> String {
        match &self.vhost {
            Some(vhost) => format!("{}@{}", self.name, vhost),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for ExchangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Discovered or desired state of one exchange
///
/// Discovered records are built fresh from CLI output on every pass and
/// discarded after matching; they are never mutated in place. A record with
/// `present: false` signals absence only and carries no meaningful
/// `kind`/`arguments` content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Composite identity
    pub key: ExchangeKey,

    /// Exchange type (e.g. "direct", "topic"); passed through verbatim
    #[serde(rename = "type")]
    pub kind: String,

    /// Internal flag (not usable by publishers)
    pub internal: bool,

    /// Survives broker restart
    pub durable: bool,

    /// Deleted when the last binding is removed
    pub auto_delete: bool,

    /// Exchange arguments (e.g. alternate-exchange)
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,

    /// Whether the record represents an existing or desired-to-exist exchange
    pub present: bool,
}
