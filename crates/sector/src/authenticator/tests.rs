use chrono::TimeZone;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use spool_primitives::{BLOCK_SIZE, Block, DumpError, KEY_LEN, SectorKey, Technology, Uid};

use super::*;
use crate::derive::{BambuKdf, KeyDerivation};

const UID: Uid = Uid::new([0x75, 0x88, 0x6B, 0x1D]);
const GARBAGE: [u8; KEY_LEN] = [0x13, 0x37, 0x13, 0x37, 0x13, 0x37];

fn trailer(key_a: [u8; KEY_LEN], key_b: [u8; KEY_LEN]) -> Block {
	let mut block = [0u8; BLOCK_SIZE];
	block[0..6].copy_from_slice(&key_a);
	block[6..10].copy_from_slice(&[0xFF, 0x07, 0x80, 0x69]);
	block[10..16].copy_from_slice(&key_b);
	block
}

fn sector(fill: u8, key_a: [u8; KEY_LEN], key_b: [u8; KEY_LEN]) -> RawSector {
	RawSector::new(vec![[fill; BLOCK_SIZE], [fill; BLOCK_SIZE], [fill; BLOCK_SIZE], trailer(key_a, key_b)])
}

fn capture(sectors: Vec<RawSector>) -> RawScan {
	RawScan::new(UID, Technology::MifareClassic1k, sectors).unwrap()
}

fn bambu_key_a(index: usize) -> [u8; KEY_LEN] {
	*BambuKdf.derive(&UID)[index].key.as_bytes()
}

/// A 1K capture where every sector is locked with its Bambu slot-A key.
fn bambu_capture() -> RawScan {
	let sectors = (0..16)
		.map(|i| sector(i as u8, bambu_key_a(i), GARBAGE))
		.collect();
	capture(sectors)
}

fn at() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
}

#[test]
fn bambu_capture_authenticates_every_sector() {
	let scan = SectorAuthenticator::default().authenticate_at(&bambu_capture(), at());

	assert_eq!(scan.result(), ScanResult::Success);
	assert_eq!(scan.captured_at(), at());
	let auth = scan.authentication();
	assert_eq!(auth.authenticated_sectors().len(), 16);
	assert!(auth.failed_sectors().is_empty());
	assert_eq!(auth.key_label(0), Some("bambu-a-00"));
	assert_eq!(auth.key_label(15), Some("bambu-a-15"));
	assert_eq!(auth.grants()[&7].slot, KeySlot::A);
	assert!(scan.errors().is_empty());

	// 16 sectors x 3 data blocks; trailers never copied.
	assert_eq!(scan.blocks().len(), 48);
	assert_eq!(scan.blocks().block(5), Some(&[1u8; BLOCK_SIZE]));
	assert!(!scan.blocks().contains(3));
	assert!(!scan.blocks().contains(63));
}

#[test]
fn all_sectors_failing_is_authentication_failed() {
	let sectors = (0..16).map(|_| sector(0xAB, GARBAGE, GARBAGE)).collect();
	let raw = capture(sectors);
	let scan = SectorAuthenticator::default().authenticate_at(&raw, at());

	assert_eq!(scan.result(), ScanResult::AuthenticationFailed);
	assert!(scan.blocks().is_empty());
	assert!(scan.authentication().authenticated_sectors().is_empty());
	assert_eq!(scan.authentication().failed_sectors().len(), 16);
	assert!(scan.authentication().grants().is_empty());
	// One line per sector plus the summary.
	assert_eq!(scan.errors().len(), 17);
}

#[test]
fn one_sector_is_insufficient_data() {
	let mut sectors: Vec<_> = (0..16).map(|_| sector(0, GARBAGE, GARBAGE)).collect();
	sectors[2] = sector(0x22, bambu_key_a(2), GARBAGE);
	let raw = capture(sectors);
	let scan = SectorAuthenticator::default().authenticate_at(&raw, at());

	assert_eq!(scan.result(), ScanResult::InsufficientData);
	assert_eq!(scan.blocks().len(), 3);
	assert!(scan.blocks().contains_all([8, 9, 10]));
	assert!(scan.errors().last().is_some_and(|e| e.starts_with("insufficient data")));
}

#[test]
fn slot_b_is_tried_after_slot_a() {
	let ff = [0xFF; KEY_LEN];
	let raw = capture(vec![sector(1, GARBAGE, ff), sector(2, ff, GARBAGE)]);
	let scan = SectorAuthenticator::default().authenticate_at(&raw, at());
	let grants = scan.authentication().grants();

	assert_eq!(
		grants[&0],
		SectorGrant {
			label: "transport-FFFFFFFFFFFF".to_string(),
			slot: KeySlot::B
		}
	);
	assert_eq!(grants[&1].slot, KeySlot::A);
	assert_eq!(scan.result(), ScanResult::Success);
}

#[test]
fn earlier_candidate_wins_over_later_slot_a_match() {
	// Slot A holds a transport key, slot B the sector's Bambu key. Bambu keys come
	// first in the chain, so the slot-B Bambu match is recorded.
	let raw = capture(vec![sector(1, [0xFF; KEY_LEN], bambu_key_a(0))]);
	let scan = SectorAuthenticator::default().authenticate_at(&raw, at());
	let grant = &scan.authentication().grants()[&0];
	assert_eq!(grant.label, "bambu-a-00");
	assert_eq!(grant.slot, KeySlot::B);
}

#[test]
fn failed_sectors_contribute_no_blocks() {
	let mut sectors: Vec<_> = (0..4).map(|i| sector(i, bambu_key_a(i as usize), GARBAGE)).collect();
	sectors[1] = sector(0xEE, GARBAGE, GARBAGE);
	sectors[3] = RawSector::empty();
	let raw = capture(sectors);
	let scan = SectorAuthenticator::default().authenticate_at(&raw, at());

	assert!(!scan.blocks().contains_all([4, 5, 6]));
	assert!(!scan.blocks().iter().any(|(_, b)| b == &[0xEE; BLOCK_SIZE]));
	assert!(scan.errors().iter().any(|e| e == "sector 3: not captured"));
	assert_eq!(
		scan.authentication().failed_sectors().iter().copied().collect::<Vec<_>>(),
		[1, 3]
	);
}

#[test]
fn misshapen_capture_is_rejected_before_authentication() {
	// Sector 0 carries a whole 4K-sized sector behind an open transport key; its extra
	// blocks would otherwise land on the locked sector 1, trailer index included.
	let mut oversized = vec![[0x5A; BLOCK_SIZE]; 15];
	oversized.push(trailer([0xFF; KEY_LEN], GARBAGE));
	let sectors = vec![RawSector::new(oversized), sector(0xEE, GARBAGE, GARBAGE)];

	assert_eq!(
		RawScan::new(UID, Technology::MifareClassic1k, sectors),
		Err(DumpError::SectorShape {
			sector: 0,
			blocks: 16,
			expected: 4
		})
	);
}

#[test]
fn large_sectors_contribute_fifteen_blocks() {
	let mut sectors = vec![RawSector::empty(); 32];
	let mut large = vec![[0x4B; BLOCK_SIZE]; 15];
	large.push(trailer([0xFF; KEY_LEN], GARBAGE));
	sectors.push(RawSector::new(large));
	let raw = RawScan::new(UID, Technology::MifareClassic4k, sectors).unwrap();
	let authenticator = SectorAuthenticator::new(KeyChain::standard(), AuthPolicy::new(1));
	let scan = authenticator.authenticate_at(&raw, at());

	assert_eq!(scan.result(), ScanResult::Success);
	assert_eq!(scan.blocks().len(), 15);
	assert!(scan.blocks().contains_all(128..143));
	assert!(!scan.blocks().contains(143));
}

#[test]
fn empty_capture_is_authentication_failed() {
	let raw = capture(Vec::new());
	let scan = authenticate(&raw);
	assert_eq!(scan.result(), ScanResult::AuthenticationFailed);
	assert!(scan.blocks().is_empty());
}

#[test]
fn policy_minimum_is_at_least_one() {
	assert_eq!(AuthPolicy::new(0).min_authenticated_sectors, 1);
	assert_eq!(AuthPolicy::new(0).classify(0), ScanResult::AuthenticationFailed);
	assert_eq!(AuthPolicy::new(5).classify(4), ScanResult::InsufficientData);
	assert_eq!(AuthPolicy::new(5).classify(5), ScanResult::Success);
}

#[test]
fn derived_keys_are_recorded_in_order() {
	let scan = SectorAuthenticator::default().authenticate_at(&bambu_capture(), at());
	let recorded: Vec<_> = scan
		.authentication()
		.derived_keys()
		.iter()
		.map(|c| c.label.as_str())
		.collect();
	let expected: Vec<_> = KeyChain::standard().derive(&UID).into_iter().map(|c| c.label).collect();
	assert_eq!(recorded, expected);
}

#[derive(Debug, Clone, Copy)]
enum Lock {
	BambuA,
	TransportB,
	Garbage,
	Missing,
	/// Data plus trailer only; the trailer sits where block 1 belongs.
	Short,
	/// Sixteen blocks in a four-block sector.
	Oversized,
}

impl Lock {
	fn is_misshapen(self) -> bool {
		matches!(self, Lock::Short | Lock::Oversized)
	}
}

fn arb_lock() -> impl Strategy<Value = Lock> {
	prop_oneof![
		4 => Just(Lock::BambuA),
		4 => Just(Lock::TransportB),
		4 => Just(Lock::Garbage),
		4 => Just(Lock::Missing),
		1 => Just(Lock::Short),
		1 => Just(Lock::Oversized),
	]
}

fn locked_sector(index: usize, lock: Lock) -> RawSector {
	let open_b = [0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7];
	match lock {
		Lock::BambuA => sector(1, bambu_key_a(index), GARBAGE),
		Lock::TransportB => sector(2, GARBAGE, open_b),
		Lock::Garbage => sector(3, GARBAGE, GARBAGE),
		Lock::Missing => RawSector::empty(),
		Lock::Short => RawSector::new(vec![[4; BLOCK_SIZE], trailer(GARBAGE, open_b)]),
		Lock::Oversized => {
			let mut blocks = vec![[5; BLOCK_SIZE]; 15];
			blocks.push(trailer(GARBAGE, open_b));
			RawSector::new(blocks)
		}
	}
}

proptest! {
	/// Authenticated and failed sectors always partition the capture, and only
	/// well-shaped captures reach the authenticator.
	#[test]
	fn prop_sectors_partition(locks in proptest::collection::vec(arb_lock(), 0..16)) {
		let sectors: Vec<_> = locks
			.iter()
			.enumerate()
			.map(|(i, &lock)| locked_sector(i, lock))
			.collect();
		let built = RawScan::new(UID, Technology::MifareClassic1k, sectors);

		if let Some(bad) = locks.iter().position(|l| l.is_misshapen()) {
			let is_shape_error = matches!(built, Err(DumpError::SectorShape { sector, .. }) if sector == bad);
			prop_assert!(is_shape_error);
			return Ok(());
		}

		let raw = built.unwrap();
		let scan = SectorAuthenticator::default().authenticate_at(&raw, at());
		let auth = scan.authentication();

		prop_assert!(auth.is_partition_of(raw.sector_count()));
		let opened = locks
			.iter()
			.filter(|l| matches!(l, Lock::BambuA | Lock::TransportB))
			.count();
		prop_assert_eq!(auth.authenticated_sectors().len(), opened);
		prop_assert_eq!(scan.blocks().len(), opened * 3);
		prop_assert_eq!(auth.grants().len(), opened);
		for &sector in auth.failed_sectors() {
			let first = first_block_of_sector(sector);
			prop_assert!((first..first + 4).all(|i| !scan.blocks().contains(i)));
		}
	}
}

#[test]
fn static_key_opens_sector() {
	let raw = capture(vec![sector(0, GARBAGE, GARBAGE)]);
	let keys = KeyChain::new().with(crate::derive::StaticKeys::new(vec![CandidateKey::new(
		SectorKey::new(GARBAGE),
		"operator",
	)]));
	let scan = SectorAuthenticator::new(keys, AuthPolicy::new(1)).authenticate_at(&raw, at());
	assert_eq!(scan.authentication().key_label(0), Some("operator"));
	assert_eq!(scan.result(), ScanResult::Success);
}
