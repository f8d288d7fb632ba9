use std::io::Write;

use pretty_assertions::assert_eq;
use spool_primitives::{MIN_SECTORS_FOR_ANY_FORMAT, Uid};

use super::*;

const UID: Uid = Uid::new([0x75, 0x88, 0x6B, 0x1D]);

#[test]
fn empty_config_uses_defaults() {
	let config = ScannerConfig::from_toml("").unwrap();
	assert_eq!(config, ScannerConfig::default());
	assert!(config.authentication.transport_keys);
	assert_eq!(
		config.auth_policy().min_authenticated_sectors,
		MIN_SECTORS_FOR_ANY_FORMAT
	);
	assert_eq!(config.catalog.path, None);

	let keys = config.key_chain().unwrap().derive(&UID);
	let standard = KeyChain::standard().derive(&UID);
	assert_eq!(keys, standard);
}

#[test]
fn full_config_parses() {
	let config = ScannerConfig::from_toml(
		r#"
		[authentication]
		min_sectors = 4
		transport_keys = false
		extra_keys = [{ label = "workshop", key = "a1b2c3d4e5f6" }]

		[catalog]
		path = "/var/lib/spool/catalog.json"
		"#,
	)
	.unwrap();

	assert_eq!(config.auth_policy().min_authenticated_sectors, 4);
	assert_eq!(
		config.catalog.path.as_deref(),
		Some(Path::new("/var/lib/spool/catalog.json"))
	);

	let keys = config.key_chain().unwrap().derive(&UID);
	assert_eq!(keys.len(), 33);
	assert_eq!(keys[32].label, "workshop");
	assert_eq!(keys[32].key.to_hex(), "A1B2C3D4E5F6");
	assert!(!keys.iter().any(|k| k.label.starts_with("transport-")));
}

#[test]
fn bad_extra_key_is_rejected() {
	let config = ScannerConfig::from_toml(
		r#"
		[authentication]
		extra_keys = [{ label = "short", key = "A1B2" }]
		"#,
	)
	.unwrap();
	assert!(matches!(
		config.key_chain(),
		Err(ConfigError::InvalidKey { label, .. }) if label == "short"
	));
}

#[test]
fn unknown_field_is_a_parse_error() {
	let err = ScannerConfig::from_toml("[authentication]\nmin_sector = 2\n").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[authentication]\nmin_sectors = 3").unwrap();
	let config = ScannerConfig::load(file.path()).unwrap();
	assert_eq!(config.authentication.min_sectors, Some(3));
}

#[test]
fn missing_config_file_is_a_read_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = ScannerConfig::load(&dir.path().join("absent.toml")).unwrap_err();
	assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn missing_catalog_file_fails_handle_construction() {
	let dir = tempfile::tempdir().unwrap();
	let config = ScannerConfig {
		catalog: CatalogConfig {
			path: Some(dir.path().join("catalog.json")),
		},
		..ScannerConfig::default()
	};
	assert!(matches!(
		config.catalog_handle(),
		Err(ConfigError::Catalog(CatalogError::Io { .. }))
	));
}
