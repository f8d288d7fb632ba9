use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::file::CatalogFile;
use crate::snapshot::CatalogSnapshot;

/// Produces catalog snapshots for a [`crate::CatalogHandle`].
///
/// Implementations own where the data lives; the handle owns publication.
pub trait CatalogSource: Send + Sync {
	/// Short label for diagnostics.
	fn describe(&self) -> String;

	/// Builds a fresh, unpublished snapshot.
	fn load(&self) -> Result<CatalogSnapshot, CatalogError>;
}

/// Source yielding the compiled-in seed tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
	fn describe(&self) -> String {
		"builtin".to_string()
	}

	fn load(&self) -> Result<CatalogSnapshot, CatalogError> {
		Ok(CatalogSnapshot::builtin())
	}
}

/// Source reading a [`CatalogFile`] JSON document from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
	path: PathBuf,
}

impl JsonFileCatalog {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl CatalogSource for JsonFileCatalog {
	fn describe(&self) -> String {
		self.path.display().to_string()
	}

	fn load(&self) -> Result<CatalogSnapshot, CatalogError> {
		let json = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
			path: self.path.clone(),
			source,
		})?;
		CatalogFile::from_json(&json)?.into_snapshot()
	}
}
