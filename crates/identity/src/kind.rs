use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{CompoundIdentity, hash_pairs};

/// Kinds of inventory graph entity named by a compound identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Tray,
	Tag,
	Filament,
	Core,
	Spool,
}

impl EntityKind {
	pub const ALL: [EntityKind; 5] = [
		EntityKind::Tray,
		EntityKind::Tag,
		EntityKind::Filament,
		EntityKind::Core,
		EntityKind::Spool,
	];

	pub const fn name(self) -> &'static str {
		match self {
			EntityKind::Tray => "tray",
			EntityKind::Tag => "tag",
			EntityKind::Filament => "filament",
			EntityKind::Core => "core",
			EntityKind::Spool => "spool",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Ordered pair sequence that always starts with `("type", kind)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBuilder {
	kind: EntityKind,
	pairs: Vec<(String, String)>,
}

impl IdentityBuilder {
	pub const TYPE_KEY: &'static str = "type";

	pub fn new(kind: EntityKind) -> Self {
		Self {
			kind,
			pairs: vec![(Self::TYPE_KEY.to_string(), kind.name().to_string())],
		}
	}

	/// Appends a pair. Position matters.
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.pairs.push((key.into(), value.into()));
		self
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}

	pub fn build(&self) -> CompoundIdentity {
		let (id, _) = hash_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
		id
	}
}
