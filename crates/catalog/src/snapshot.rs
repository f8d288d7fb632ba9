//! Immutable catalog view.
//!
//! Snapshots are cheap to clone (all tables sit behind `Arc`) and are never mutated
//! once published through a [`crate::CatalogHandle`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use spool_primitives::TagFormat;

use crate::builtins;
use crate::entry::CatalogEntry;
use crate::error::CatalogError;
use crate::product::{ProductEntry, ProductKey};
use crate::table::{CatalogTable, Table};

/// Single source of truth for catalog lookups.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
	version: u32,
	last_updated: Option<String>,
	/// Publication counter, assigned by the handle.
	pub(crate) generation: u64,
	/// Indexed by [`Table::index`]; always [`Table::COUNT`] long.
	tables: Arc<[CatalogTable]>,
	products: Arc<FxHashMap<ProductKey, ProductEntry>>,
}

impl CatalogSnapshot {
	/// Assembles a snapshot, rejecting empty codes and ambiguous product keys.
	///
	/// Tables named more than once are merged, later entries replacing earlier ones.
	pub fn from_parts(
		version: u32,
		last_updated: Option<String>,
		tables: impl IntoIterator<Item = CatalogTable>,
		products: impl IntoIterator<Item = ProductEntry>,
	) -> Result<Self, CatalogError> {
		let mut slots: Vec<CatalogTable> = Table::ALL.into_iter().map(CatalogTable::new).collect();
		for table in tables {
			let slot = &mut slots[table.table().index()];
			for entry in table.entries() {
				if entry.code.is_empty() {
					return Err(CatalogError::EmptyCode {
						table: table.table(),
					});
				}
				slot.insert(entry.clone());
			}
		}

		let mut index = FxHashMap::default();
		for product in products {
			if product.sku.is_empty() {
				return Err(CatalogError::EmptySku { key: product.key });
			}
			if index.contains_key(&product.key) {
				return Err(CatalogError::DuplicateProduct { key: product.key });
			}
			index.insert(product.key.clone(), product);
		}

		Ok(Self {
			version,
			last_updated,
			generation: 0,
			tables: slots.into(),
			products: Arc::new(index),
		})
	}

	/// Tables compiled into the crate; used until a catalog file has been loaded.
	pub fn builtin() -> Self {
		let tables = Table::ALL.into_iter().map(|table| {
			CatalogTable::from_entries(
				table,
				builtins::table_rows(table)
					.iter()
					.map(|&(code, name, description)| CatalogEntry::new(code, name, description)),
			)
		});
		let products = builtins::PRODUCTS.iter().map(builtins::product_entry);

		// `Table::ALL` is declared in index order.
		let slots: Vec<CatalogTable> = tables.collect();
		Self {
			version: builtins::VERSION,
			last_updated: None,
			generation: 0,
			tables: slots.into(),
			products: Arc::new(products.map(|p| (p.key.clone(), p)).collect()),
		}
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn last_updated(&self) -> Option<&str> {
		self.last_updated.as_deref()
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn table(&self, table: Table) -> &CatalogTable {
		&self.tables[table.index()]
	}

	pub fn resolve(&self, table: Table, code: &str) -> Option<&CatalogEntry> {
		self.table(table).resolve(code)
	}

	pub fn is_known(&self, table: Table, code: &str) -> bool {
		self.table(table).is_known(code)
	}

	/// Looks up a product by exact key.
	pub fn product(&self, key: &ProductKey) -> Option<&ProductEntry> {
		self.products.get(key)
	}

	pub fn product_for(&self, format: TagFormat, material: &str, variant: &str) -> Option<&ProductEntry> {
		self.product(&ProductKey::new(format, material, variant))
	}

	pub fn products(&self) -> impl Iterator<Item = &ProductEntry> + '_ {
		self.products.values()
	}

	pub fn product_count(&self) -> usize {
		self.products.len()
	}
}

impl Default for CatalogSnapshot {
	fn default() -> Self {
		Self::builtin()
	}
}
