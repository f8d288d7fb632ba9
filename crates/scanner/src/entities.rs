use serde::{Deserialize, Serialize};
use spool_identity::{CompoundIdentity, EntityKind, IdentityBuilder};
use spool_interpret::InterpretationResult;

/// Inventory graph identities derived from one interpreted tag.
///
/// Each kind hashes a fixed attribute order:
///
/// | Kind | Pairs |
/// |------|-------|
/// | tray | `type`, `trayUid` |
/// | tag | `type`, `tagUid` |
/// | filament | `type`, `sku`, `trayUid` |
/// | core | `type`, `trayUid`, `material` |
/// | spool | `type`, `trayUid`, `sku`, `variant` |
///
/// `trayUid` is the result's unit id and `tagUid` the tag UID in hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntities {
	pub tray: CompoundIdentity,
	pub tag: CompoundIdentity,
	pub filament: CompoundIdentity,
	pub core: CompoundIdentity,
	pub spool: CompoundIdentity,
}

impl ScanEntities {
	pub fn builders(result: &InterpretationResult) -> [IdentityBuilder; 5] {
		let tray_uid = result.unit_id.as_str();
		[
			IdentityBuilder::new(EntityKind::Tray).attr("trayUid", tray_uid),
			IdentityBuilder::new(EntityKind::Tag).attr("tagUid", result.uid.to_hex()),
			IdentityBuilder::new(EntityKind::Filament)
				.attr("sku", result.sku.as_str())
				.attr("trayUid", tray_uid),
			IdentityBuilder::new(EntityKind::Core)
				.attr("trayUid", tray_uid)
				.attr("material", result.material.code.as_str()),
			IdentityBuilder::new(EntityKind::Spool)
				.attr("trayUid", tray_uid)
				.attr("sku", result.sku.as_str())
				.attr("variant", result.variant.as_str()),
		]
	}

	pub fn from_interpretation(result: &InterpretationResult) -> Self {
		let [tray, tag, filament, core, spool] = Self::builders(result).map(|b| b.build());
		Self {
			tray,
			tag,
			filament,
			core,
			spool,
		}
	}

	pub fn get(&self, kind: EntityKind) -> &CompoundIdentity {
		match kind {
			EntityKind::Tray => &self.tray,
			EntityKind::Tag => &self.tag,
			EntityKind::Filament => &self.filament,
			EntityKind::Core => &self.core,
			EntityKind::Spool => &self.spool,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &CompoundIdentity)> + '_ {
		EntityKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
	}
}
