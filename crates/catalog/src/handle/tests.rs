use std::sync::Arc;
use std::thread;

use spool_primitives::TagFormat;
use tempfile::NamedTempFile;

use super::*;
use crate::source::JsonFileCatalog;
use crate::table::Table;

fn catalog_json(version: u32, sku: &str) -> String {
	format!(
		r#"{{
			"version": {version},
			"tables": {{ "bambu_material": {{ "GFA00": "PLA Basic" }} }},
			"products": [
				{{ "sku": "{sku}", "format": "bambu", "material": "GFA00", "variant": "A00-K0", "name": "PLA Basic Black" }}
			]
		}}"#
	)
}

fn rewrite(file: &NamedTempFile, json: &str) {
	std::fs::write(file.path(), json).unwrap();
}

/// Consecutive loads without a publish return the same Arc.
#[test]
fn snapshot_is_stable_without_publish() {
	let handle = CatalogHandle::builtin();
	let a = handle.snapshot();
	let b = handle.snapshot();
	assert!(Arc::ptr_eq(&a, &b));
	assert_eq!(a.generation(), 1);
}

#[test]
fn refresh_publishes_new_snapshot_and_keeps_pins_alive() {
	let file = NamedTempFile::new().unwrap();
	rewrite(&file, &catalog_json(1, "10101"));
	let handle = CatalogHandle::new(JsonFileCatalog::new(file.path())).unwrap();

	let pinned = handle.snapshot();
	rewrite(&file, &catalog_json(2, "SKU-NEW"));
	let refreshed = handle.refresh_mappings().unwrap();

	assert_eq!(refreshed.version(), 2);
	assert_eq!(refreshed.generation(), pinned.generation() + 1);
	assert_eq!(
		handle
			.snapshot()
			.product_for(TagFormat::Bambu, "GFA00", "A00-K0")
			.map(|p| p.sku.clone()),
		Some("SKU-NEW".to_string())
	);
	// The reader's pinned view did not move.
	assert_eq!(pinned.version(), 1);
	assert_eq!(
		pinned
			.product_for(TagFormat::Bambu, "GFA00", "A00-K0")
			.map(|p| p.sku.as_str()),
		Some("10101")
	);
}

#[test]
fn failed_refresh_keeps_previous_snapshot() {
	let file = NamedTempFile::new().unwrap();
	rewrite(&file, &catalog_json(3, "10101"));
	let handle = CatalogHandle::new(JsonFileCatalog::new(file.path())).unwrap();
	let before = handle.snapshot();

	rewrite(&file, "{ not json");
	assert!(matches!(handle.refresh_mappings(), Err(CatalogError::Parse(_))));

	let after = handle.snapshot();
	assert!(Arc::ptr_eq(&before, &after));
	assert!(after.is_known(Table::BambuMaterial, "GFA00"));
}

#[test]
fn missing_file_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = CatalogHandle::new(JsonFileCatalog::new(dir.path().join("absent.json"))).unwrap_err();
	assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn refresh_is_idempotent() {
	let handle = CatalogHandle::builtin();
	let first = handle.refresh_mappings().unwrap();
	let second = handle.refresh_mappings().unwrap();
	assert_eq!(first.product_count(), second.product_count());
	assert_eq!(first.version(), second.version());
	assert_eq!(second.generation(), first.generation() + 1);
}

/// Concurrent publishes are linearizable: every one lands as its own generation.
#[test]
fn concurrent_publishes_are_not_lost() {
	let handle = Arc::new(CatalogHandle::builtin());
	let start = handle.snapshot().generation();
	let threads = 8;
	let per_thread = 25;

	let workers: Vec<_> = (0..threads)
		.map(|_| {
			let handle = Arc::clone(&handle);
			thread::spawn(move || {
				let mut seen = Vec::with_capacity(per_thread);
				for _ in 0..per_thread {
					seen.push(handle.publish(CatalogSnapshot::builtin()).generation());
				}
				seen
			})
		})
		.collect();

	let mut generations: Vec<u64> = workers
		.into_iter()
		.flat_map(|w| w.join().unwrap())
		.collect();
	generations.sort_unstable();
	generations.dedup();

	let total = (threads * per_thread) as u64;
	assert_eq!(generations.len() as u64, total);
	assert_eq!(handle.snapshot().generation(), start + total);
}
