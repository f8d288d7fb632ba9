//! Core types for spool tag scanning: raw captures, sector keys, decrypted block maps,
//! and the classification records shared by every later stage.

/// Decrypted block storage and typed field readers.
pub mod block;
/// RGBA colour values read from tag memory.
pub mod color;
/// Tag format families.
pub mod format;
/// Sector key material and key slots.
pub mod keys;
/// Raw reader captures and MIFARE Classic geometry.
pub mod raw;
/// Authentication outcomes and decrypted scans.
pub mod scan;
/// Tag UIDs and radio technology labels.
pub mod uid;

pub use block::{BLOCK_SIZE, Block, BlockMap};
pub use color::Rgba;
pub use format::{MIN_SECTORS_FOR_ANY_FORMAT, TagFormat};
pub use keys::{CandidateKey, KEY_LEN, KeySlot, SectorKey};
pub use raw::{DumpError, RawScan, RawSector, blocks_in_sector, first_block_of_sector};
pub use scan::{AuthenticationOutcome, DecryptedScan, ScanResult, SectorGrant};
pub use uid::{ParseUidError, Technology, UID_LEN, Uid};
