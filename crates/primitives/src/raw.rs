//! Raw captures as handed over by the radio collaborator.
//!
//! A capture is organised the way MIFARE Classic memory is: sectors 0..32 hold four
//! 16-byte blocks, sectors 32..40 (4K parts only) hold sixteen. The final block of
//! every sector is its trailer, carrying key A, the access bits, and key B.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{BLOCK_SIZE, Block};
use crate::keys::{KeySlot, SectorKey};
use crate::uid::{Technology, Uid};

/// Sectors with four blocks; anything above uses the large sector layout.
const SMALL_SECTORS: usize = 32;
const SMALL_SECTOR_BLOCKS: usize = 4;
const LARGE_SECTOR_BLOCKS: usize = 16;
/// Largest sector count of any MIFARE Classic part (4K).
const MAX_SECTORS: usize = 40;

/// Number of blocks held by `sector`.
pub const fn blocks_in_sector(sector: usize) -> usize {
	if sector < SMALL_SECTORS {
		SMALL_SECTOR_BLOCKS
	} else {
		LARGE_SECTOR_BLOCKS
	}
}

/// Absolute index of the first block of `sector`.
pub const fn first_block_of_sector(sector: usize) -> usize {
	if sector < SMALL_SECTORS {
		sector * SMALL_SECTOR_BLOCKS
	} else {
		SMALL_SECTORS * SMALL_SECTOR_BLOCKS + (sector - SMALL_SECTORS) * LARGE_SECTOR_BLOCKS
	}
}

/// Errors produced while assembling a capture from a dump or from sectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
	#[error("memory dump is empty")]
	Empty,
	#[error("memory dump truncated in sector {sector}: need {needed} bytes, {available} left")]
	Truncated {
		sector: usize,
		needed: usize,
		available: usize,
	},
	#[error("memory dump has {bytes} bytes, more than the largest supported part")]
	TooLarge { bytes: usize },
	#[error("capture has {sectors} sectors, more than the largest supported part")]
	TooManySectors { sectors: usize },
	#[error("sector {sector} captured {blocks} blocks, its geometry holds {expected}")]
	SectorShape {
		sector: usize,
		blocks: usize,
		expected: usize,
	},
}

/// Blocks captured for a single sector, trailer last.
///
/// An empty sector means the reader captured nothing for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSector {
	blocks: Vec<Block>,
}

impl RawSector {
	pub fn new(blocks: Vec<Block>) -> Self {
		Self { blocks }
	}

	pub fn empty() -> Self {
		Self::default()
	}

	/// True when the capture holds at least a data block and a trailer.
	pub fn is_captured(&self) -> bool {
		self.blocks.len() >= 2
	}

	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	pub fn trailer(&self) -> Option<&Block> {
		if self.is_captured() {
			self.blocks.last()
		} else {
			None
		}
	}

	/// Data blocks, i.e. every block except the trailer.
	pub fn data_blocks(&self) -> &[Block] {
		match self.blocks.split_last() {
			Some((_, data)) if self.is_captured() => data,
			_ => &[],
		}
	}

	/// Attempts authentication of `slot` with `key` against the captured trailer.
	pub fn accepts(&self, slot: KeySlot, key: &SectorKey) -> bool {
		self.trailer()
			.map(|trailer| trailer[slot.trailer_range()] == key.as_bytes()[..])
			.unwrap_or(false)
	}
}

/// One physical read of a tag. Immutable once built.
///
/// Every sector is either empty or holds exactly [`blocks_in_sector`] blocks, so a
/// sector's data blocks never spill into a neighbour's block indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScanParts")]
pub struct RawScan {
	uid: Uid,
	technology: Technology,
	sectors: Vec<RawSector>,
}

#[derive(Deserialize)]
struct RawScanParts {
	uid: Uid,
	technology: Technology,
	sectors: Vec<RawSector>,
}

impl TryFrom<RawScanParts> for RawScan {
	type Error = DumpError;

	fn try_from(parts: RawScanParts) -> Result<Self, DumpError> {
		Self::new(parts.uid, parts.technology, parts.sectors)
	}
}

impl RawScan {
	/// Builds a capture from per-sector blocks, rejecting sectors that do not match
	/// the MIFARE Classic geometry.
	pub fn new(uid: Uid, technology: Technology, sectors: Vec<RawSector>) -> Result<Self, DumpError> {
		if sectors.len() > MAX_SECTORS {
			return Err(DumpError::TooManySectors {
				sectors: sectors.len(),
			});
		}
		for (sector, raw) in sectors.iter().enumerate() {
			let expected = blocks_in_sector(sector);
			let blocks = raw.blocks().len();
			if blocks != 0 && blocks != expected {
				return Err(DumpError::SectorShape {
					sector,
					blocks,
					expected,
				});
			}
		}
		Ok(Self {
			uid,
			technology,
			sectors,
		})
	}

	/// Splits a flat memory dump (block 0 first) into sectors.
	pub fn from_dump(uid: Uid, technology: Technology, dump: &[u8]) -> Result<Self, DumpError> {
		if dump.is_empty() {
			return Err(DumpError::Empty);
		}

		let mut sectors = Vec::new();
		let mut rest = dump;
		while !rest.is_empty() {
			let sector = sectors.len();
			if sector >= MAX_SECTORS {
				return Err(DumpError::TooLarge { bytes: dump.len() });
			}
			let needed = blocks_in_sector(sector) * BLOCK_SIZE;
			if rest.len() < needed {
				return Err(DumpError::Truncated {
					sector,
					needed,
					available: rest.len(),
				});
			}
			let (head, tail) = rest.split_at(needed);
			let blocks = head
				.chunks_exact(BLOCK_SIZE)
				.map(|chunk| {
					let mut block = [0u8; BLOCK_SIZE];
					block.copy_from_slice(chunk);
					block
				})
				.collect();
			sectors.push(RawSector::new(blocks));
			rest = tail;
		}

		Self::new(uid, technology, sectors)
	}

	pub fn uid(&self) -> Uid {
		self.uid
	}

	pub fn technology(&self) -> &Technology {
		&self.technology
	}

	pub fn sectors(&self) -> &[RawSector] {
		&self.sectors
	}

	pub fn sector_count(&self) -> usize {
		self.sectors.len()
	}
}
