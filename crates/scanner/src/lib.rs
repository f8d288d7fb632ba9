//! Spool tag scanning.
//!
//! [`Scanner`] wires the sector authenticator to a refreshable catalog:
//!
//! - [`Scanner::authenticate`] turns a [`RawScan`] into a [`DecryptedScan`].
//! - [`Scanner::interpret`] resolves a decrypted scan against the current catalog.
//! - [`Scanner::refresh_mappings`] reloads and atomically republishes the catalog.
//! - [`Scanner::scan`] does all of the above for one capture and names the inventory
//!   graph entities it touched ([`ScanEntities`]).
//!
//! The library installs no tracing subscriber; embedders choose their own.

mod config;
mod entities;
mod scanner;

pub use config::{AuthenticationConfig, CatalogConfig, ConfigError, ExtraKey, ScannerConfig};
pub use entities::ScanEntities;
pub use scanner::{ScanReport, Scanner};
pub use spool_catalog::{CatalogHandle, CatalogSnapshot};
pub use spool_identity::{CompoundIdentity, EntityKind, build_id};
pub use spool_interpret::{FilamentDetails, Interpretation, InterpretationResult};
pub use spool_primitives::{DecryptedScan, RawScan, ScanResult, TagFormat, Technology, Uid};
