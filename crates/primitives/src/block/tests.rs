use proptest::prelude::*;

use super::*;

fn map_with(index: usize, block: Block) -> BlockMap {
	[(index, block)].into_iter().collect()
}

#[test]
fn ascii_stops_at_nul() {
	let mut block = [0u8; BLOCK_SIZE];
	block[8..13].copy_from_slice(b"GFA00");
	let map = map_with(1, block);
	assert_eq!(map.ascii(1, 8..16).as_deref(), Some("GFA00"));
	assert_eq!(map.ascii(1, 0..8).as_deref(), Some(""));
}

#[test]
fn ascii_rejects_binary() {
	let mut block = [0u8; BLOCK_SIZE];
	block[0..3].copy_from_slice(&[b'P', 0x01, b'A']);
	let map = map_with(2, block);
	assert_eq!(map.ascii(2, 0..16), None);
}

#[test]
fn integers_follow_declared_endianness() {
	let mut block = [0u8; BLOCK_SIZE];
	block[0..2].copy_from_slice(&[0xFA, 0x00]);
	block[4..8].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);
	let map = map_with(5, block);
	assert_eq!(map.u16_le(5, 0), Some(250));
	assert_eq!(map.u16_be(5, 0), Some(0xFA00));
	assert_eq!(map.u32_be(5, 4), Some(0x1234_5678));
	assert_eq!(map.u24_be(5, 4), Some(0x12_3456));
}

#[test]
fn float_reads_little_endian() {
	let mut block = [0u8; BLOCK_SIZE];
	block[8..12].copy_from_slice(&1.75f32.to_le_bytes());
	let map = map_with(5, block);
	assert_eq!(map.f32_le(5, 8), Some(1.75));
}

#[test]
fn ascii_span_joins_blocks() {
	let map: BlockMap = [(4, *b"AB1240276A210100"), (5, *b"10FFFFFF03300000")]
		.into_iter()
		.collect();
	assert_eq!(
		map.ascii_span(4..6).as_deref(),
		Some("AB1240276A21010010FFFFFF03300000")
	);
	assert_eq!(map.ascii_span(4..7), None);
}

#[test]
fn missing_blocks_read_as_none() {
	let map = BlockMap::new();
	assert!(map.is_empty());
	assert_eq!(map.u16_le(5, 0), None);
	assert_eq!(map.ascii(1, 0..8), None);
	assert!(!map.contains_all([1, 2]));
}

proptest! {
	/// Readers never panic, whatever the offset.
	#[test]
	fn prop_readers_are_total(index in 0usize..8, offset in 0usize..64) {
		let map = map_with(3, [0x41; BLOCK_SIZE]);
		let _ = map.u16_le(index, offset);
		let _ = map.u24_be(index, offset);
		let _ = map.u32_be(index, offset);
		let _ = map.f32_le(index, offset);
		let _ = map.ascii(index, offset..offset.saturating_add(4));
		prop_assert!(map.u8(3, offset).is_some() == (offset < BLOCK_SIZE));
	}
}
