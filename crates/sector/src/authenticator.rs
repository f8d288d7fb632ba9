use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spool_primitives::{
	AuthenticationOutcome, BlockMap, CandidateKey, DecryptedScan, KeySlot, MIN_SECTORS_FOR_ANY_FORMAT,
	RawScan, RawSector, ScanResult, SectorGrant, blocks_in_sector, first_block_of_sector,
};

use crate::derive::KeyChain;

/// Classification thresholds for an authentication pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPolicy {
	/// Fewest authenticated sectors classified as [`ScanResult::Success`].
	pub min_authenticated_sectors: usize,
}

impl Default for AuthPolicy {
	fn default() -> Self {
		Self {
			min_authenticated_sectors: MIN_SECTORS_FOR_ANY_FORMAT,
		}
	}
}

impl AuthPolicy {
	/// Policy requiring `min` sectors; a minimum of zero is raised to one.
	pub fn new(min: usize) -> Self {
		Self {
			min_authenticated_sectors: min.max(1),
		}
	}

	pub fn classify(&self, authenticated: usize) -> ScanResult {
		if authenticated == 0 {
			ScanResult::AuthenticationFailed
		} else if authenticated < self.min_authenticated_sectors {
			ScanResult::InsufficientData
		} else {
			ScanResult::Success
		}
	}
}

/// Authenticates raw captures against a [`KeyChain`].
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct SectorAuthenticator {
	keys: KeyChain,
	policy: AuthPolicy,
}

impl Default for SectorAuthenticator {
	fn default() -> Self {
		Self::new(KeyChain::standard(), AuthPolicy::default())
	}
}

impl SectorAuthenticator {
	pub fn new(keys: KeyChain, policy: AuthPolicy) -> Self {
		Self { keys, policy }
	}

	pub fn keys(&self) -> &KeyChain {
		&self.keys
	}

	pub fn policy(&self) -> AuthPolicy {
		self.policy
	}

	/// Authenticates `raw`, stamping the result with the current time.
	pub fn authenticate(&self, raw: &RawScan) -> DecryptedScan {
		self.authenticate_at(raw, Utc::now())
	}

	/// Authenticates `raw` with an explicit capture timestamp.
	pub fn authenticate_at(&self, raw: &RawScan, captured_at: DateTime<Utc>) -> DecryptedScan {
		let uid = raw.uid();
		let candidates = self.keys.derive(&uid);
		let mut outcome = AuthenticationOutcome::new(candidates.clone());
		let mut blocks = BlockMap::new();
		let mut errors = Vec::new();

		for (sector, raw_sector) in raw.sectors().iter().enumerate() {
			if !raw_sector.is_captured() {
				errors.push(format!("sector {sector}: not captured"));
				outcome.record_failure(sector);
				continue;
			}

			match first_accepted(raw_sector, &candidates) {
				Some(grant) => {
					tracing::trace!(%uid, sector, label = %grant.label, slot = %grant.slot, "sector authenticated");
					let first = first_block_of_sector(sector);
					let data = raw_sector.data_blocks().iter().take(blocks_in_sector(sector) - 1);
					for (offset, block) in data.enumerate() {
						blocks.insert(first + offset, *block);
					}
					outcome.record_success(sector, grant);
				}
				None => {
					errors.push(format!(
						"sector {sector}: no candidate key accepted ({} tried)",
						candidates.len()
					));
					outcome.record_failure(sector);
				}
			}
		}

		let authenticated = outcome.authenticated_sectors().len();
		let result = self.policy.classify(authenticated);
		match result {
			ScanResult::AuthenticationFailed => {
				errors.push("authentication failed: no sector accepted any key".to_string());
			}
			ScanResult::InsufficientData => errors.push(format!(
				"insufficient data: {authenticated} sector(s) authenticated, {} required",
				self.policy.min_authenticated_sectors
			)),
			ScanResult::Success | ScanResult::ParsingFailed => {}
		}

		tracing::debug!(
			%uid,
			sectors = raw.sector_count(),
			authenticated,
			failed = outcome.failed_sectors().len(),
			candidates = candidates.len(),
			?result,
			"authentication pass complete"
		);

		DecryptedScan::new(
			uid,
			captured_at,
			raw.technology().clone(),
			result,
			blocks,
			outcome,
			errors,
		)
	}
}

/// Authenticates `raw` with the standard key chain and default policy.
pub fn authenticate(raw: &RawScan) -> DecryptedScan {
	SectorAuthenticator::default().authenticate(raw)
}

/// First candidate (and slot, A before B) the sector accepts.
fn first_accepted(sector: &RawSector, candidates: &[CandidateKey]) -> Option<SectorGrant> {
	candidates.iter().find_map(|candidate| {
		KeySlot::ORDER
			.into_iter()
			.find(|&slot| sector.accepts(slot, &candidate.key))
			.map(|slot| SectorGrant {
				label: candidate.label.clone(),
				slot,
			})
	})
}

#[cfg(test)]
mod tests;
