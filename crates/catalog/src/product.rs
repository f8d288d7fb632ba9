use serde::{Deserialize, Serialize};
use spool_primitives::TagFormat;

/// Exact address of a catalog product.
///
/// `variant` is format specific: the Bambu variant id (`A00-K0`), the TigerTag product
/// id, or the Creality colour field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductKey {
	pub format: TagFormat,
	pub material: String,
	pub variant: String,
}

impl ProductKey {
	pub fn new(format: TagFormat, material: impl Into<String>, variant: impl Into<String>) -> Self {
		Self {
			format,
			material: material.into(),
			variant: variant.into(),
		}
	}
}

/// Sellable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
	pub sku: String,
	pub key: ProductKey,
	pub name: String,
	pub color_name: String,
}
