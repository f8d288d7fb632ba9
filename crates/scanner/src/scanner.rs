use std::sync::Arc;

use spool_catalog::{CatalogError, CatalogHandle, CatalogSnapshot};
use spool_interpret::{Interpretation, InterpretationResult};
use spool_primitives::{DecryptedScan, RawScan};
use spool_sector::SectorAuthenticator;

use crate::config::{ConfigError, ScannerConfig};
use crate::entities::ScanEntities;

/// Everything one [`Scanner::scan`] learned about a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
	pub scan: DecryptedScan,
	pub interpretation: Interpretation,
	/// Present only when the interpretation resolved.
	pub entities: Option<ScanEntities>,
	/// Generation of the catalog snapshot the scan was interpreted against.
	pub catalog_generation: u64,
}

impl ScanReport {
	pub fn result(&self) -> Option<&InterpretationResult> {
		self.interpretation.as_result()
	}
}

/// Authenticator plus a shared, refreshable catalog.
///
/// Cheap to clone; clones share the catalog handle.
#[derive(Debug, Clone)]
pub struct Scanner {
	authenticator: SectorAuthenticator,
	catalog: Arc<CatalogHandle>,
}

impl Default for Scanner {
	fn default() -> Self {
		Self::new(SectorAuthenticator::default(), Arc::new(CatalogHandle::builtin()))
	}
}

impl Scanner {
	pub fn new(authenticator: SectorAuthenticator, catalog: Arc<CatalogHandle>) -> Self {
		Self { authenticator, catalog }
	}

	pub fn from_config(config: &ScannerConfig) -> Result<Self, ConfigError> {
		let authenticator = config.authenticator()?;
		let catalog = config.catalog_handle()?;
		tracing::debug!(
			keys = ?authenticator.keys(),
			min_sectors = authenticator.policy().min_authenticated_sectors,
			catalog = ?catalog,
			"scanner configured"
		);
		Ok(Self::new(authenticator, Arc::new(catalog)))
	}

	pub fn authenticator(&self) -> &SectorAuthenticator {
		&self.authenticator
	}

	pub fn catalog(&self) -> &Arc<CatalogHandle> {
		&self.catalog
	}

	pub fn authenticate(&self, raw: &RawScan) -> DecryptedScan {
		self.authenticator.authenticate(raw)
	}

	/// Interprets against the snapshot published right now.
	pub fn interpret(&self, scan: &DecryptedScan) -> Option<InterpretationResult> {
		spool_interpret::interpret(scan, &self.catalog.snapshot())
	}

	pub fn evaluate(&self, scan: &DecryptedScan) -> Interpretation {
		spool_interpret::evaluate(scan, &self.catalog.snapshot())
	}

	/// Reloads the catalog source and publishes it. On failure the current snapshot
	/// stays published.
	pub fn refresh_mappings(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
		self.catalog.refresh_mappings()
	}

	/// Authenticates, interprets, and names the entities of one capture.
	///
	/// A single snapshot is pinned for the whole call.
	pub fn scan(&self, raw: &RawScan) -> ScanReport {
		let catalog = self.catalog.snapshot();
		let scan = self.authenticate(raw);
		let interpretation = spool_interpret::evaluate(&scan, &catalog);
		let entities = interpretation.as_result().map(ScanEntities::from_interpretation);

		tracing::info!(
			uid = %scan.uid(),
			result = ?interpretation.scan_result(),
			format = ?interpretation.format(),
			sku = interpretation.as_result().map(|r| r.sku.as_str()),
			generation = catalog.generation(),
			"scan complete"
		);

		ScanReport {
			scan,
			interpretation,
			entities,
			catalog_generation: catalog.generation(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_share_the_catalog() {
		let scanner = Scanner::default();
		let clone = scanner.clone();
		assert!(Arc::ptr_eq(scanner.catalog(), clone.catalog()));
	}
}
