use std::fmt;

use serde::{Deserialize, Serialize};

/// Length in bytes of a MIFARE Classic sector key.
pub const KEY_LEN: usize = 6;

/// Six-byte sector key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorKey([u8; KEY_LEN]);

impl SectorKey {
	pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
		Self(bytes)
	}

	pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
		&self.0
	}

	/// Builds a key from the first [`KEY_LEN`] bytes of `bytes`.
	///
	/// Returns `None` when fewer bytes are available.
	pub fn from_slice(bytes: &[u8]) -> Option<Self> {
		let head = bytes.get(..KEY_LEN)?;
		let mut key = [0u8; KEY_LEN];
		key.copy_from_slice(head);
		Some(Self(key))
	}

	pub fn to_hex(&self) -> String {
		hex::encode_upper(self.0)
	}
}

// Keys are secrets on real deployments; keep them out of Debug dumps beyond a prefix.
impl fmt::Debug for SectorKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SectorKey({:02X}{:02X}..)", self.0[0], self.0[1])
	}
}

impl fmt::Display for SectorKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

/// A derived key plus the human label that names where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateKey {
	pub key: SectorKey,
	pub label: String,
}

impl CandidateKey {
	pub fn new(key: SectorKey, label: impl Into<String>) -> Self {
		Self {
			key,
			label: label.into(),
		}
	}
}

/// Key slot of a sector trailer. Authentication always tries `A` before `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySlot {
	A,
	B,
}

impl KeySlot {
	/// Slots in the order authentication attempts them.
	pub const ORDER: [KeySlot; 2] = [KeySlot::A, KeySlot::B];

	/// Byte range of this slot inside a sector trailer block.
	pub const fn trailer_range(self) -> std::ops::Range<usize> {
		match self {
			KeySlot::A => 0..KEY_LEN,
			KeySlot::B => 10..10 + KEY_LEN,
		}
	}
}

impl fmt::Display for KeySlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KeySlot::A => f.write_str("A"),
			KeySlot::B => f.write_str("B"),
		}
	}
}
