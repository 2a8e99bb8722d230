//! Manifest file loading and validation

use crate::error::{Error, Result};
use crate::types::{BrokerSettings, Credentials, Ensure, ExchangeDecl, ManifestFile};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;

/// Manifest file names to search for
const MANIFEST_FILE_NAMES: &[&str] = &["warren.yaml", "warren.yml"];

/// Manifest versions this build understands
const SUPPORTED_VERSIONS: &[&str] = &["1", "1.0"];

/// Loaded and validated Warren manifest
#[derive(Debug, Clone)]
pub struct WarrenConfig {
    /// The parsed manifest
    pub manifest: ManifestFile,

    /// Path to the manifest file
    pub config_path: Utf8PathBuf,

    /// Working directory
    pub working_dir: Utf8PathBuf,
}

impl WarrenConfig {
    /// Load the manifest from the specified path or search for it
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::manifest_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            (p.to_owned(), content)
        } else {
            Self::find_manifest()?
        };

        let working_dir = config_path
            .parent()
            .map(|p| p.to_owned())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        let manifest: ManifestFile = serde_yaml_ng::from_str(&content)?;

        let config = Self {
            manifest,
            config_path,
            working_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Search the current directory for a manifest file
    fn find_manifest() -> Result<(Utf8PathBuf, String)> {
        for name in MANIFEST_FILE_NAMES {
            let candidate = Utf8PathBuf::from(name);
            if let Ok(content) = fs::read_to_string(&candidate) {
                return Ok((candidate, content));
            }
        }
        Err(Error::manifest_not_found(MANIFEST_FILE_NAMES.join(" or ")))
    }

    /// Validate manifest invariants beyond what serde enforces
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&self.manifest.version.as_str()) {
            return Err(Error::invalid_manifest(format!(
                "unsupported manifest version '{}' (supported: {})",
                self.manifest.version,
                SUPPORTED_VERSIONS.join(", ")
            )));
        }

        let mut seen = HashSet::new();
        for decl in &self.manifest.exchanges {
            if decl.ensure == Ensure::Present && decl.kind.is_none() {
                return Err(Error::missing_field(format!(
                    "exchanges[{}].type",
                    decl.name
                )));
            }

            if !seen.insert(decl.name.as_str()) {
                return Err(Error::invalid_manifest(format!(
                    "duplicate exchange declaration '{}'",
                    decl.name
                )));
            }
        }

        Ok(())
    }

    /// Broker CLI settings
    pub fn broker(&self) -> &BrokerSettings {
        &self.manifest.broker
    }

    /// Declared exchange resources
    pub fn exchanges(&self) -> &[ExchangeDecl] {
        &self.manifest.exchanges
    }

    /// Resolve credentials for one declaration
    pub fn credentials_for(&self, decl: &ExchangeDecl) -> Credentials {
        decl.credentials(&self.manifest.defaults)
    }
}
