//! Published catalog pointer.
//!
//! # Role
//!
//! Hands out pinned snapshots to interpreters and swaps in replacements on refresh.
//! Replacement snapshots are built off to the side and published with CAS; the
//! snapshot a reader pinned stays valid for as long as the reader holds it.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::CatalogError;
use crate::snapshot::CatalogSnapshot;
use crate::source::{BuiltinCatalog, CatalogSource};

/// Atomically published catalog snapshot plus the source it refreshes from.
pub struct CatalogHandle {
	current: ArcSwap<CatalogSnapshot>,
	source: Box<dyn CatalogSource>,
}

impl std::fmt::Debug for CatalogHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snap = self.current.load();
		f.debug_struct("CatalogHandle")
			.field("source", &self.source.describe())
			.field("version", &snap.version())
			.field("generation", &snap.generation())
			.finish()
	}
}

impl CatalogHandle {
	/// Loads the initial snapshot from `source` and publishes it.
	pub fn new(source: impl CatalogSource + 'static) -> Result<Self, CatalogError> {
		let initial = source.load()?;
		Ok(Self::with_snapshot(initial, source))
	}

	/// Publishes `initial` without consulting `source` until the first refresh.
	pub fn with_snapshot(mut initial: CatalogSnapshot, source: impl CatalogSource + 'static) -> Self {
		initial.generation = 1;
		Self {
			current: ArcSwap::from_pointee(initial),
			source: Box::new(source),
		}
	}

	/// Handle over the compiled-in tables.
	pub fn builtin() -> Self {
		Self::with_snapshot(CatalogSnapshot::builtin(), BuiltinCatalog)
	}

	/// Pins the currently published snapshot.
	#[inline]
	pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
		self.current.load_full()
	}

	/// Reloads from the source and publishes the result.
	///
	/// On failure the previously published snapshot stays in place and the error is
	/// returned. Calling this repeatedly is safe; each success publishes a new
	/// generation with the same content when the source has not changed.
	pub fn refresh_mappings(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
		match self.source.load() {
			Ok(snapshot) => Ok(self.publish(snapshot)),
			Err(err) => {
				tracing::warn!(
					source = %self.source.describe(),
					error = %err,
					"catalog refresh failed; keeping published snapshot"
				);
				Err(err)
			}
		}
	}

	/// Publishes `snapshot` as the next generation and returns the pinned result.
	pub fn publish(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
		loop {
			let old = self.current.load_full();
			let mut next = snapshot.clone();
			next.generation = old.generation.saturating_add(1);
			let next = Arc::new(next);

			let prev = self.current.compare_and_swap(&old, Arc::clone(&next));
			if Arc::ptr_eq(&prev, &old) {
				tracing::info!(
					version = next.version(),
					generation = next.generation(),
					products = next.product_count(),
					"published catalog snapshot"
				);
				return next;
			}
			// Lost the race; rebuild on top of the winner.
		}
	}
}

#[cfg(test)]
mod tests;
