use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Size in bytes of one tag memory block.
pub const BLOCK_SIZE: usize = 16;

/// One 16-byte block of tag memory.
pub type Block = [u8; BLOCK_SIZE];

/// Decrypted blocks keyed by absolute block index.
///
/// Only blocks of authenticated sectors are ever present, and sector trailers are
/// never inserted. Every reader returns `None` when the block is absent or the range
/// falls outside the block; none of them panic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMap {
	blocks: BTreeMap<usize, Block>,
}

impl BlockMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, index: usize, block: Block) {
		self.blocks.insert(index, block);
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	pub fn contains(&self, index: usize) -> bool {
		self.blocks.contains_key(&index)
	}

	/// Returns true when every block in `indices` is present.
	pub fn contains_all(&self, indices: impl IntoIterator<Item = usize>) -> bool {
		indices.into_iter().all(|i| self.contains(i))
	}

	pub fn block(&self, index: usize) -> Option<&Block> {
		self.blocks.get(&index)
	}

	pub fn iter(&self) -> impl Iterator<Item = (usize, &Block)> + '_ {
		self.blocks.iter().map(|(i, b)| (*i, b))
	}

	/// Raw bytes of `range` within block `index`.
	pub fn bytes(&self, index: usize, range: Range<usize>) -> Option<&[u8]> {
		self.block(index)?.get(range)
	}

	/// Fixed-size copy of `N` bytes starting at `offset` within block `index`.
	pub fn array<const N: usize>(&self, index: usize, offset: usize) -> Option<[u8; N]> {
		let bytes = self.bytes(index, offset..offset.checked_add(N)?)?;
		let mut out = [0u8; N];
		out.copy_from_slice(bytes);
		Some(out)
	}

	/// ASCII text of `range`, cut at the first NUL and trimmed of padding spaces.
	///
	/// Returns `None` if any byte before the cut is not printable ASCII.
	pub fn ascii(&self, index: usize, range: Range<usize>) -> Option<String> {
		let bytes = self.bytes(index, range)?;
		let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
		let text = &bytes[..end];
		if !text.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
			return None;
		}
		Some(String::from_utf8_lossy(text).trim().to_string())
	}

	/// ASCII text spanning several consecutive blocks, without NUL trimming.
	pub fn ascii_span(&self, indices: Range<usize>) -> Option<String> {
		let mut out = String::with_capacity(indices.len() * BLOCK_SIZE);
		for index in indices {
			let block = self.block(index)?;
			if !block.is_ascii() {
				return None;
			}
			out.extend(block.iter().map(|&b| b as char));
		}
		Some(out)
	}

	pub fn u8(&self, index: usize, offset: usize) -> Option<u8> {
		self.block(index)?.get(offset).copied()
	}

	pub fn u16_le(&self, index: usize, offset: usize) -> Option<u16> {
		self.array(index, offset).map(u16::from_le_bytes)
	}

	pub fn u16_be(&self, index: usize, offset: usize) -> Option<u16> {
		self.array(index, offset).map(u16::from_be_bytes)
	}

	/// Big-endian 24-bit unsigned value.
	pub fn u24_be(&self, index: usize, offset: usize) -> Option<u32> {
		let [a, b, c] = self.array::<3>(index, offset)?;
		Some(u32::from_be_bytes([0, a, b, c]))
	}

	pub fn u32_be(&self, index: usize, offset: usize) -> Option<u32> {
		self.array(index, offset).map(u32::from_be_bytes)
	}

	pub fn f32_le(&self, index: usize, offset: usize) -> Option<f32> {
		self.array(index, offset).map(f32::from_le_bytes)
	}
}

impl FromIterator<(usize, Block)> for BlockMap {
	fn from_iter<I: IntoIterator<Item = (usize, Block)>>(iter: I) -> Self {
		Self {
			blocks: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests;
