//! Interpretation of decrypted tag blocks into catalog facts.
//!
//! # Purpose
//!
//! Take a [`DecryptedScan`] and a pinned [`CatalogSnapshot`], work out which vendor
//! layout wrote the tag, decode that layout, and resolve its codes against the catalog.
//!
//! # Mental model
//!
//! 1. **Gate:** anything other than [`ScanResult::Success`] is not interpreted.
//! 2. **Detect:** each format in [`TagFormat::KNOWN`] order tests its structural
//!    signature against the block map. The first match wins.
//! 3. **Decode:** the matching format's pure decode function reads fixed offsets.
//! 4. **Resolve:** every required code must hit the catalog exactly. One miss and the
//!    whole result is dropped.
//!
//! [`evaluate`] reports which of these steps stopped the pipeline as an
//! [`Interpretation`]. [`interpret`] collapses that to `Option`.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`Interpretation`] | Outcome of one pass, including the reason for refusal. |
//! | [`InterpretationResult`] | Fully resolved spool description. |
//! | [`FilamentDetails`] | Optional print parameters read from the layout. |
//! | [`CatalogField`] | Which required lookup missed. |
//!
//! # Invariants
//!
//! - A scan that is not `Success` is never interpreted.
//!   - Enforced in: [`evaluate`].
//!   - Tested by: `dispatch::tests::non_success_scans_are_not_interpreted`
//!
//! - Detection order is fixed and total: exactly one [`TagFormat`] per block map.
//!   - Enforced in: [`detect`].
//!   - Tested by: `dispatch::tests::bambu_wins_over_later_signatures`
//!
//! - No result is built from a partial catalog match or a placeholder entry.
//!   - Enforced in: each format's `resolve`.
//!   - Tested by: `dispatch::tests::unknown_variant_is_a_catalog_miss`
//!   - Failure symptom: an unknown spool shows a guessed SKU.
//!
//! # Adding a format
//!
//! Add a [`TagFormat`] variant, a module under `formats/` with `matches` and `decode`,
//! and one arm in each match in `dispatch.rs`. The authenticator and identity builder
//! do not change.
//!
//! [`DecryptedScan`]: spool_primitives::DecryptedScan
//! [`ScanResult::Success`]: spool_primitives::ScanResult::Success
//! [`TagFormat`]: spool_primitives::TagFormat
//! [`TagFormat::KNOWN`]: spool_primitives::TagFormat::KNOWN
//! [`CatalogSnapshot`]: spool_catalog::CatalogSnapshot

mod dispatch;
mod formats;
mod outcome;
mod result;

pub use dispatch::{detect, evaluate, interpret};
pub use outcome::{CatalogField, Interpretation};
pub use result::{FilamentDetails, InterpretationResult};
