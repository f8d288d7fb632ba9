//! One module per [`TagFormat`](spool_primitives::TagFormat) layout.
//!
//! Each exposes `matches(&BlockMap) -> bool` (the structural signature) and
//! `decode(uid, &BlockMap, &CatalogSnapshot)`. Both are pure.

pub(crate) mod bambu;
pub(crate) mod creality;
pub(crate) mod tigertag;
