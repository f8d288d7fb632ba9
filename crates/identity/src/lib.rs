//! Compound identities: short deterministic names for deduplicated graph entities.
//!
//! An identity is the first 8 bytes of a SHA-256 digest over an ordered sequence of
//! `(key, value)` attribute pairs, rendered as 16 lowercase hex characters.
//!
//! # Invariants
//!
//! - Identical ordered sequences always produce identical identities.
//!   - Tested by: `id::tests::prop_build_id_is_deterministic`
//! - Order is significant. Pairs are never sorted, so callers must supply them in a
//!   fixed per-kind order ([`IdentityBuilder`] starts every sequence with
//!   `("type", kind)`).
//!   - Tested by: `id::tests::swapped_order_changes_identity`
//! - Pair boundaries are part of the hashed encoding: `("ab", "c")` and `("a", "bc")`
//!   hash differently.
//!   - Tested by: `id::tests::pair_boundaries_are_encoded`

mod id;
mod kind;

pub use id::{CompoundIdentity, IDENTITY_LEN, IdentityError, build_id};
pub use kind::{EntityKind, IdentityBuilder};
