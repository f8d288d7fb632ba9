use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of a rendered identity in hex characters.
pub const IDENTITY_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
	#[error("compound identity needs at least one attribute pair")]
	Empty,
	#[error("invalid compound identity {0:?}: expected {IDENTITY_LEN} lowercase hex characters")]
	Invalid(String),
}

/// 16 lowercase hex characters naming one graph entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompoundIdentity(String);

impl CompoundIdentity {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CompoundIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for CompoundIdentity {
	type Err = IdentityError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let valid = s.len() == IDENTITY_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
		if valid {
			Ok(Self(s.to_string()))
		} else {
			Err(IdentityError::Invalid(s.to_string()))
		}
	}
}

impl TryFrom<String> for CompoundIdentity {
	type Error = IdentityError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<CompoundIdentity> for String {
	fn from(id: CompoundIdentity) -> Self {
		id.0
	}
}

impl AsRef<str> for CompoundIdentity {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

fn write_field(hasher: &mut Sha256, field: &[u8]) {
	// u64 length prefix keeps field boundaries unambiguous.
	hasher.update((field.len() as u64).to_be_bytes());
	hasher.update(field);
}

/// Hashes `pairs`, returning the identity and how many pairs went in.
pub(crate) fn hash_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> (CompoundIdentity, usize)
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut hasher = Sha256::new();
	let mut count = 0usize;
	for (key, value) in pairs {
		write_field(&mut hasher, key.as_ref().as_bytes());
		write_field(&mut hasher, value.as_ref().as_bytes());
		count += 1;
	}
	let digest = hasher.finalize();
	(CompoundIdentity(hex::encode(&digest[..IDENTITY_LEN / 2])), count)
}

/// Builds the identity for an ordered sequence of attribute pairs.
///
/// Pure and order sensitive. The only failure is an empty sequence.
///
/// ```
/// let a = spool_identity::build_id([("type", "tray"), ("trayUid", "X")]).unwrap();
/// let b = spool_identity::build_id([("trayUid", "X"), ("type", "tray")]).unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.as_str().len(), 16);
/// ```
pub fn build_id<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<CompoundIdentity, IdentityError>
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	match hash_pairs(pairs) {
		(_, 0) => Err(IdentityError::Empty),
		(id, _) => Ok(id),
	}
}
