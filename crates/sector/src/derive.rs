use std::sync::Arc;

use hkdf::Hkdf;
use rustc_hash::FxHashSet;
use sha2::Sha256;
use spool_primitives::{CandidateKey, KEY_LEN, SectorKey, Uid};

/// Derives candidate sector keys from a tag UID.
///
/// Implementations must be pure: the same UID always yields the same keys in the
/// same order. Earlier keys are tried first.
pub trait KeyDerivation: Send + Sync {
	/// Short name used in logs.
	fn name(&self) -> &str;

	fn derive(&self, uid: &Uid) -> Vec<CandidateKey>;
}

/// Bambu Lab key schedule: HKDF-SHA256 over the UID with the vendor master salt.
///
/// Sixteen keys per slot family, one per sector of a 1K part.
#[derive(Debug, Clone, Copy, Default)]
pub struct BambuKdf;

impl BambuKdf {
	const MASTER_SALT: [u8; 16] = [
		0x9a, 0x75, 0x9c, 0xf2, 0xc4, 0xf7, 0xca, 0xff, 0x22, 0x2c, 0xb9, 0x76, 0x9b, 0x41, 0xbc, 0x96,
	];
	const KEYS_PER_FAMILY: usize = 16;
	const FAMILIES: [(&'static str, &'static [u8]); 2] = [("a", b"RFID-A\0"), ("b", b"RFID-B\0")];

	fn family(uid: &Uid, info: &[u8]) -> Option<[u8; KEY_LEN * Self::KEYS_PER_FAMILY]> {
		let hk = Hkdf::<Sha256>::new(Some(&Self::MASTER_SALT[..]), uid.as_bytes());
		let mut okm = [0u8; KEY_LEN * Self::KEYS_PER_FAMILY];
		hk.expand(info, &mut okm).ok()?;
		Some(okm)
	}
}

impl KeyDerivation for BambuKdf {
	fn name(&self) -> &str {
		"bambu"
	}

	fn derive(&self, uid: &Uid) -> Vec<CandidateKey> {
		let mut keys = Vec::with_capacity(Self::FAMILIES.len() * Self::KEYS_PER_FAMILY);
		for (family, info) in Self::FAMILIES {
			let Some(okm) = Self::family(uid, info) else {
				// 96 bytes is within the HKDF-SHA256 output limit.
				tracing::error!(%uid, family, "hkdf expansion rejected output length");
				continue;
			};
			keys.extend(
				okm.chunks_exact(KEY_LEN)
					.filter_map(SectorKey::from_slice)
					.enumerate()
					.map(|(i, key)| CandidateKey::new(key, format!("bambu-{family}-{i:02}"))),
			);
		}
		keys
	}
}

/// Well-known factory and application-directory keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportKeys;

impl TransportKeys {
	pub const KEYS: [[u8; KEY_LEN]; 4] = [
		[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
		[0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5],
		[0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7],
		[0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
	];
}

impl KeyDerivation for TransportKeys {
	fn name(&self) -> &str {
		"transport"
	}

	fn derive(&self, _uid: &Uid) -> Vec<CandidateKey> {
		Self::KEYS
			.iter()
			.map(|&bytes| {
				let key = SectorKey::new(bytes);
				CandidateKey::new(key, format!("transport-{}", key.to_hex()))
			})
			.collect()
	}
}

/// Fixed operator-supplied keys, independent of the UID.
#[derive(Debug, Clone, Default)]
pub struct StaticKeys {
	keys: Vec<CandidateKey>,
}

impl StaticKeys {
	pub fn new(keys: Vec<CandidateKey>) -> Self {
		Self { keys }
	}
}

impl KeyDerivation for StaticKeys {
	fn name(&self) -> &str {
		"static"
	}

	fn derive(&self, _uid: &Uid) -> Vec<CandidateKey> {
		self.keys.clone()
	}
}

/// Ordered composition of derivations.
#[derive(Clone, Default)]
pub struct KeyChain {
	sources: Vec<Arc<dyn KeyDerivation>>,
}

impl std::fmt::Debug for KeyChain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.sources.iter().map(|s| s.name()))
			.finish()
	}
}

impl KeyChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bambu keys first, then the transport keys.
	pub fn standard() -> Self {
		Self::new().with(BambuKdf).with(TransportKeys)
	}

	pub fn with(mut self, source: impl KeyDerivation + 'static) -> Self {
		self.sources.push(Arc::new(source));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Concatenates every source's keys in order, keeping the first label for
	/// repeated key bytes.
	pub fn derive(&self, uid: &Uid) -> Vec<CandidateKey> {
		let mut seen = FxHashSet::default();
		self.sources
			.iter()
			.flat_map(|source| source.derive(uid))
			.filter(|candidate| seen.insert(candidate.key))
			.collect()
	}
}
