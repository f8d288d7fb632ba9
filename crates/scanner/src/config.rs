//! Scanner configuration read from TOML.
//!
//! ```toml
//! [authentication]
//! min_sectors = 2
//! transport_keys = true
//! extra_keys = [{ label = "workshop", key = "A1B2C3D4E5F6" }]
//!
//! [catalog]
//! path = "catalog.json"
//! ```
//!
//! Every section and field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use spool_catalog::{CatalogError, CatalogHandle, JsonFileCatalog};
use spool_primitives::{CandidateKey, KEY_LEN, SectorKey};
use spool_sector::{AuthPolicy, BambuKdf, KeyChain, SectorAuthenticator, StaticKeys, TransportKeys};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("extra key {label:?} must be {} hex digits, got {key:?}", KEY_LEN * 2)]
	InvalidKey { label: String, key: String },
	#[error(transparent)]
	Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
	pub authentication: AuthenticationConfig,
	pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationConfig {
	/// Fewest authenticated sectors for a successful scan. Unset uses the smallest
	/// known layout.
	pub min_sectors: Option<usize>,
	/// Try the well-known factory keys after the derived ones.
	pub transport_keys: bool,
	pub extra_keys: Vec<ExtraKey>,
}

impl Default for AuthenticationConfig {
	fn default() -> Self {
		Self {
			min_sectors: None,
			transport_keys: true,
			extra_keys: Vec::new(),
		}
	}
}

/// Operator-supplied sector key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraKey {
	pub label: String,
	/// Twelve hex digits.
	pub key: String,
}

impl ExtraKey {
	fn candidate(&self) -> Result<CandidateKey, ConfigError> {
		let mut bytes = [0u8; KEY_LEN];
		hex::decode_to_slice(&self.key, &mut bytes).map_err(|_| ConfigError::InvalidKey {
			label: self.label.clone(),
			key: self.key.clone(),
		})?;
		Ok(CandidateKey::new(SectorKey::new(bytes), self.label.clone()))
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
	/// Catalog JSON file. Unset uses the compiled-in tables.
	pub path: Option<PathBuf>,
}

impl ScannerConfig {
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml(&text)
	}

	pub fn auth_policy(&self) -> AuthPolicy {
		self.authentication
			.min_sectors
			.map(AuthPolicy::new)
			.unwrap_or_default()
	}

	/// Bambu keys, then operator keys, then transport keys when enabled.
	pub fn key_chain(&self) -> Result<KeyChain, ConfigError> {
		let extra = self
			.authentication
			.extra_keys
			.iter()
			.map(ExtraKey::candidate)
			.collect::<Result<Vec<_>, _>>()?;

		let mut chain = KeyChain::new().with(BambuKdf);
		if !extra.is_empty() {
			chain = chain.with(StaticKeys::new(extra));
		}
		if self.authentication.transport_keys {
			chain = chain.with(TransportKeys);
		}
		Ok(chain)
	}

	pub fn authenticator(&self) -> Result<SectorAuthenticator, ConfigError> {
		Ok(SectorAuthenticator::new(self.key_chain()?, self.auth_policy()))
	}

	/// Loads the configured catalog, failing if the file cannot be read.
	pub fn catalog_handle(&self) -> Result<CatalogHandle, ConfigError> {
		match &self.catalog.path {
			Some(path) => Ok(CatalogHandle::new(JsonFileCatalog::new(path))?),
			None => Ok(CatalogHandle::builtin()),
		}
	}
}

#[cfg(test)]
mod tests;
