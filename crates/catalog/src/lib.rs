//! Catalog tables for tag interpretation.
//!
//! # Purpose
//!
//! Map short vendor codes (material ids, brand ids, vendor ids) and product keys to
//! display metadata. Interpreters consult these tables to turn decoded fields into
//! catalog facts.
//!
//! # Mental model
//!
//! 1. **Build:** a [`CatalogSource`] produces a [`CatalogSnapshot`]: the compiled-in
//!    tables ([`BuiltinCatalog`]) or a collaborator-maintained JSON file ([`JsonFileCatalog`]).
//! 2. **Publication:** a [`CatalogHandle`] holds the current snapshot behind an `ArcSwap`.
//! 3. **Consumption:** readers pin an `Arc<CatalogSnapshot>` and resolve codes against it.
//!    The pinned view never changes underneath them.
//! 4. **Refresh:** [`CatalogHandle::refresh_mappings`] loads a replacement snapshot and
//!    publishes it with CAS. The published snapshot is never mutated in place.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`CatalogEntry`] | Code, display name, and free-text description. |
//! | [`CatalogTable`] | One exact-match code table. |
//! | [`ProductEntry`] | Catalog SKU addressed by a [`ProductKey`]. |
//! | [`CatalogSnapshot`] | Immutable set of tables and products. |
//! | [`CatalogHandle`] | Atomically published snapshot pointer with refresh. |
//!
//! # Invariants
//!
//! - Lookups are exact string matches. No prefix, fuzzy, or case-insensitive matching.
//!   - Enforced in: [`CatalogTable::resolve`], [`CatalogSnapshot::product`].
//!   - Tested by: `table::tests::resolve_is_exact`, `snapshot::tests::product_lookup_is_exact`
//!   - Failure symptom: a near-miss code yields a guessed SKU.
//!
//! - `is_known(code)` agrees with `resolve(code).is_some()` for every input.
//!   - Enforced in: [`CatalogTable::is_known`].
//!   - Tested by: `table::tests::prop_is_known_agrees_with_resolve`
//!
//! - Product keys are unambiguous within a snapshot.
//!   - Enforced in: [`CatalogSnapshot::from_parts`].
//!   - Tested by: `file::tests::duplicate_products_are_rejected`
//!
//! - A failed refresh leaves the previously published snapshot in place.
//!   - Enforced in: [`CatalogHandle::refresh_mappings`].
//!   - Tested by: `handle::tests::failed_refresh_keeps_previous_snapshot`
//!
//! - Snapshot generations are monotonic across publications.
//!   - Enforced in: [`CatalogHandle::publish`] (CAS loop).
//!   - Tested by: `handle::tests::concurrent_publishes_are_not_lost`
//!
//! # Concurrency
//!
//! - **Reads:** wait-free (`ArcSwap` load plus immutable data reads).
//! - **Writes:** lock-free CAS retry loop; concurrent refreshes are linearizable.

mod builtins;
mod entry;
mod error;
mod file;
mod handle;
mod product;
mod snapshot;
mod source;
mod table;

pub use entry::CatalogEntry;
pub use error::CatalogError;
pub use file::{CatalogFile, MappingValue, ProductRecord};
pub use handle::CatalogHandle;
pub use product::{ProductEntry, ProductKey};
pub use snapshot::CatalogSnapshot;
pub use source::{BuiltinCatalog, CatalogSource, JsonFileCatalog};
pub use table::{CatalogTable, Table};
