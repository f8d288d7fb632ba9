//! Per-scan authentication records.
//!
//! # Invariants
//!
//! - Every sector of a scan is either authenticated or failed, never both.
//!   - Enforced in: [`AuthenticationOutcome::record_success`], [`AuthenticationOutcome::record_failure`].
//!   - Tested by: `scan::tests::recording_keeps_sets_disjoint`
//! - A [`DecryptedScan`] is never mutated after construction; it exposes accessors only.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::BlockMap;
use crate::keys::{CandidateKey, KeySlot};
use crate::uid::{Technology, Uid};

/// Overall classification of a scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanResult {
	/// Enough sectors were read to attempt interpretation.
	Success,
	/// No sector accepted any candidate key.
	AuthenticationFailed,
	/// Some sectors authenticated, fewer than any known layout needs.
	InsufficientData,
	/// Enough data was read but no known layout matched it.
	ParsingFailed,
}

/// Which candidate key opened a sector, and through which slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorGrant {
	pub label: String,
	pub slot: KeySlot,
}

/// Key derivation and per-sector authentication results for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationOutcome {
	derived_keys: Vec<CandidateKey>,
	authenticated: BTreeSet<usize>,
	failed: BTreeSet<usize>,
	grants: BTreeMap<usize, SectorGrant>,
}

impl AuthenticationOutcome {
	pub fn new(derived_keys: Vec<CandidateKey>) -> Self {
		Self {
			derived_keys,
			..Self::default()
		}
	}

	pub fn record_success(&mut self, sector: usize, grant: SectorGrant) {
		self.failed.remove(&sector);
		self.authenticated.insert(sector);
		self.grants.insert(sector, grant);
	}

	pub fn record_failure(&mut self, sector: usize) {
		self.authenticated.remove(&sector);
		self.grants.remove(&sector);
		self.failed.insert(sector);
	}

	/// Candidate keys in the order they were tried.
	pub fn derived_keys(&self) -> &[CandidateKey] {
		&self.derived_keys
	}

	pub fn authenticated_sectors(&self) -> &BTreeSet<usize> {
		&self.authenticated
	}

	pub fn failed_sectors(&self) -> &BTreeSet<usize> {
		&self.failed
	}

	/// Key label (and slot) that opened each authenticated sector.
	pub fn grants(&self) -> &BTreeMap<usize, SectorGrant> {
		&self.grants
	}

	pub fn key_label(&self, sector: usize) -> Option<&str> {
		self.grants.get(&sector).map(|g| g.label.as_str())
	}

	/// Returns true when the two sector sets partition `0..sector_count`.
	pub fn is_partition_of(&self, sector_count: usize) -> bool {
		self.authenticated.is_disjoint(&self.failed)
			&& self.authenticated.len() + self.failed.len() == sector_count
			&& self
				.authenticated
				.iter()
				.chain(&self.failed)
				.all(|&s| s < sector_count)
	}
}

/// Output of the sector authenticator; read-only for every later stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptedScan {
	uid: Uid,
	captured_at: DateTime<Utc>,
	technology: Technology,
	result: ScanResult,
	blocks: BlockMap,
	authentication: AuthenticationOutcome,
	errors: Vec<String>,
}

impl DecryptedScan {
	pub fn new(
		uid: Uid,
		captured_at: DateTime<Utc>,
		technology: Technology,
		result: ScanResult,
		blocks: BlockMap,
		authentication: AuthenticationOutcome,
		errors: Vec<String>,
	) -> Self {
		Self {
			uid,
			captured_at,
			technology,
			result,
			blocks,
			authentication,
			errors,
		}
	}

	pub fn uid(&self) -> Uid {
		self.uid
	}

	pub fn captured_at(&self) -> DateTime<Utc> {
		self.captured_at
	}

	pub fn technology(&self) -> &Technology {
		&self.technology
	}

	pub fn result(&self) -> ScanResult {
		self.result
	}

	pub fn is_success(&self) -> bool {
		self.result == ScanResult::Success
	}

	pub fn blocks(&self) -> &BlockMap {
		&self.blocks
	}

	pub fn authentication(&self) -> &AuthenticationOutcome {
		&self.authentication
	}

	/// Diagnostics accumulated while decoding, oldest first.
	pub fn errors(&self) -> &[String] {
		&self.errors
	}
}
