//! Sector authentication for raw tag captures.
//!
//! # Purpose
//!
//! Turn a [`RawScan`] into a [`DecryptedScan`]: derive candidate keys from the tag UID,
//! authenticate every sector against them, keep the blocks of the sectors that opened,
//! and classify the attempt.
//!
//! # Data flow
//!
//! 1. [`KeyChain::derive`] runs each [`KeyDerivation`] in order and concatenates their
//!    keys, dropping repeated key bytes (the earliest label wins).
//! 2. For each sector, candidates are tried in order against slot A then slot B; the
//!    first acceptance is recorded with its label and slot.
//! 3. Sectors that exhaust every candidate are marked failed and contribute no blocks.
//! 4. The scan is classified from the authenticated sector count and [`AuthPolicy`].
//!
//! # Invariants
//!
//! - Authenticated and failed sectors partition `0..sector_count`.
//!   - Enforced in: [`SectorAuthenticator::authenticate_at`].
//!   - Tested by: `authenticator::tests::prop_sectors_partition`
//! - Failed sectors never contribute blocks; trailers are never copied.
//!   - Enforced in: `RawScan::new` (sector shapes match the geometry) and
//!     [`SectorAuthenticator::authenticate_at`] (copies stop at the sector's last data block).
//!   - Tested by: `authenticator::tests::failed_sectors_contribute_no_blocks`,
//!     `authenticator::tests::misshapen_capture_is_rejected_before_authentication`
//! - Derivation is deterministic: the same UID yields the same ordered candidates.
//!   - Tested by: `derive::tests::bambu_keys_are_deterministic`
//!
//! # Failure modes
//!
//! Nothing here returns an error. Authentication failure and insufficient data are
//! classifications on the returned scan, and nothing is retried; a fresh physical read
//! is a new [`RawScan`].
//!
//! [`RawScan`]: spool_primitives::RawScan
//! [`DecryptedScan`]: spool_primitives::DecryptedScan

mod authenticator;
mod derive;

pub use authenticator::{AuthPolicy, SectorAuthenticator, authenticate};
pub use derive::{BambuKdf, KeyChain, KeyDerivation, StaticKeys, TransportKeys};
