use std::fmt;

use serde::{Deserialize, Serialize};

/// Colour as stored on tags, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}

	pub const fn from_bytes([r, g, b, a]: [u8; 4]) -> Self {
		Self { r, g, b, a }
	}

	/// Parses `RRGGBB` (opaque) or `RRGGBBAA`, with or without a leading `#`.
	pub fn from_hex(s: &str) -> Option<Self> {
		let s = s.strip_prefix('#').unwrap_or(s);
		let mut bytes = [0xFFu8; 4];
		match s.len() {
			6 => hex::decode_to_slice(s, &mut bytes[..3]).ok()?,
			8 => hex::decode_to_slice(s, &mut bytes).ok()?,
			_ => return None,
		}
		Some(Self::from_bytes(bytes))
	}

	/// `#RRGGBBAA`, uppercase.
	pub fn to_hex(&self) -> String {
		format!("#{}", hex::encode_upper([self.r, self.g, self.b, self.a]))
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_forms() {
		assert_eq!(Rgba::from_hex("#FF6A13"), Some(Rgba::new(0xFF, 0x6A, 0x13, 0xFF)));
		assert_eq!(Rgba::from_hex("00000080"), Some(Rgba::new(0, 0, 0, 0x80)));
		assert_eq!(Rgba::from_hex("FFF"), None);
		assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#01020304");
	}
}
