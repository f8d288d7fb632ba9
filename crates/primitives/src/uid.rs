use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length in bytes of a MIFARE Classic single-size UID.
pub const UID_LEN: usize = 4;

/// Fixed-length tag identifier as reported by the reader during anticollision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid([u8; UID_LEN]);

impl Uid {
	pub const fn new(bytes: [u8; UID_LEN]) -> Self {
		Self(bytes)
	}

	pub const fn as_bytes(&self) -> &[u8; UID_LEN] {
		&self.0
	}

	/// Uppercase hex rendering, the form used in identities and diagnostics.
	pub fn to_hex(&self) -> String {
		hex::encode_upper(self.0)
	}
}

impl From<[u8; UID_LEN]> for Uid {
	fn from(bytes: [u8; UID_LEN]) -> Self {
		Self(bytes)
	}
}

impl fmt::Display for Uid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

/// Error returned when a UID string is not exactly eight hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag uid {input:?}: expected {expected} hex digits")]
pub struct ParseUidError {
	input: String,
	expected: usize,
}

impl FromStr for Uid {
	type Err = ParseUidError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || ParseUidError {
			input: s.to_string(),
			expected: UID_LEN * 2,
		};
		let cleaned: String = s.chars().filter(|c| !matches!(c, ':' | ' ')).collect();
		let mut bytes = [0u8; UID_LEN];
		hex::decode_to_slice(&cleaned, &mut bytes).map_err(|_| err())?;
		Ok(Self(bytes))
	}
}

/// Radio technology the capture was made with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technology {
	MifareClassic1k,
	MifareClassic4k,
	/// Any other technology label reported by the radio collaborator.
	Other(String),
}

impl Technology {
	pub fn label(&self) -> &str {
		match self {
			Self::MifareClassic1k => "MIFARE Classic 1K",
			Self::MifareClassic4k => "MIFARE Classic 4K",
			Self::Other(label) => label,
		}
	}
}

impl fmt::Display for Technology {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_accepts_separators() {
		let uid: Uid = "75:88:6B:1D".parse().unwrap();
		assert_eq!(uid.as_bytes(), &[0x75, 0x88, 0x6B, 0x1D]);
		assert_eq!(uid.to_string(), "75886B1D");
	}

	#[test]
	fn parse_rejects_wrong_length() {
		assert!("75886B".parse::<Uid>().is_err());
		assert!("75886B1D00".parse::<Uid>().is_err());
		assert!("zz886B1D".parse::<Uid>().is_err());
	}
}
