use std::path::PathBuf;

use crate::product::ProductKey;
use crate::table::Table;

/// Errors raised while loading a catalog snapshot.
///
/// Lookups never fail; only building a snapshot does.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("failed to read catalog file {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed catalog file: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("empty code in table {table}")]
	EmptyCode { table: Table },

	#[error("product {key:?} has an empty sku")]
	EmptySku { key: ProductKey },

	#[error("duplicate product key {key:?}")]
	DuplicateProduct { key: ProductKey },
}
