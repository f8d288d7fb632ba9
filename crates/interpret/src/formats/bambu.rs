//! Bambu Lab layout: binary little-endian fields in blocks 1 to 16.
//!
//! | Block | Bytes | Field |
//! |-------|-------|-------|
//! | 1 | `0..8` / `8..16` | variant id (`A00-K0`) / material id (`GFA00`) |
//! | 2 | `0..16` | filament type |
//! | 4 | `0..16` | detailed filament type |
//! | 5 | `0..4`, `4..6`, `8..12` | RGBA, spool weight g, diameter mm (`f32`) |
//! | 6 | `0..12` | drying temp, drying hours, bed type, bed temp, hotend max, hotend min |
//! | 8 | `12..16` | nozzle diameter (`f32`) |
//! | 9 | `0..16` | tray UID |
//! | 10 | `4..6` | spool width, hundredths of a mm |
//! | 12 | `0..16` | production date `YYYY_MM_DD_HH_MM` |
//! | 14 | `4..6` | filament length m |
//! | 16 | `0..2`, `2..4`, `4..8` | colour format, colour count, second colour (ABGR) |

use chrono::NaiveDateTime;
use spool_catalog::{CatalogSnapshot, Table};
use spool_primitives::{BlockMap, Rgba, TagFormat, Uid};

use crate::outcome::{CatalogField, Refusal, require};
use crate::result::{FilamentDetails, InterpretationResult, nonzero, positive};

const IDS: usize = 1;
const FILAMENT_TYPE: usize = 2;
const DETAILED_TYPE: usize = 4;
const COLOR: usize = 5;
const TEMPERATURES: usize = 6;
const NOZZLE: usize = 8;
const TRAY_UID: usize = 9;
const SPOOL_WIDTH: usize = 10;
const PRODUCTION_DATE: usize = 12;
const LENGTH: usize = 14;
const MULTI_COLOR: usize = 16;

const DATE_FORMAT: &str = "%Y_%m_%d_%H_%M";

/// Fields read straight from the layout, before catalog resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
	pub material: String,
	pub variant: String,
	pub color: Rgba,
	pub tray_uid: String,
	pub details: FilamentDetails,
}

impl Layout {
	/// Series prefix of the variant id (`A00` of `A00-K0`).
	pub fn series(&self) -> Option<&str> {
		self.variant.split_once('-').map(|(series, _)| series)
	}
}

fn ids(blocks: &BlockMap) -> Option<(String, String)> {
	let variant = blocks.ascii(IDS, 0..8)?;
	let material = blocks.ascii(IDS, 8..16)?;
	Some((material, variant))
}

fn is_variant_id(variant: &str) -> bool {
	match variant.as_bytes() {
		[series, d0, d1, b'-', ..] => {
			series.is_ascii_uppercase() && d0.is_ascii_digit() && d1.is_ascii_digit()
		}
		_ => false,
	}
}

pub(crate) fn matches(blocks: &BlockMap) -> bool {
	ids(blocks).is_some_and(|(material, variant)| {
		material.len() > 2 && material.starts_with("GF") && is_variant_id(&variant)
	})
}

pub(crate) fn read(blocks: &BlockMap) -> Option<Layout> {
	let (material, variant) = ids(blocks)?;
	let color = Rgba::from_bytes(blocks.array(COLOR, 0)?);
	let tray_uid = hex::encode_upper(blocks.block(TRAY_UID)?);

	let secondary_color = match blocks.u16_le(MULTI_COLOR, 2) {
		Some(count) if count >= 2 => blocks
			.array::<4>(MULTI_COLOR, 4)
			.map(|[a, b, g, r]| Rgba::new(r, g, b, a)),
		_ => None,
	};

	let details = FilamentDetails {
		filament_type: blocks.ascii(FILAMENT_TYPE, 0..16).filter(|s| !s.is_empty()),
		detailed_type: blocks.ascii(DETAILED_TYPE, 0..16).filter(|s| !s.is_empty()),
		secondary_color,
		weight_g: nonzero(blocks.u16_le(COLOR, 4)).map(u32::from),
		diameter_mm: positive(blocks.f32_le(COLOR, 8)),
		length_m: nonzero(blocks.u16_le(LENGTH, 4)).map(u32::from),
		nozzle_diameter_mm: positive(blocks.f32_le(NOZZLE, 12)),
		hotend_min_c: nonzero(blocks.u16_le(TEMPERATURES, 10)),
		hotend_max_c: nonzero(blocks.u16_le(TEMPERATURES, 8)),
		bed_temp_c: nonzero(blocks.u16_le(TEMPERATURES, 6)),
		drying_temp_c: nonzero(blocks.u16_le(TEMPERATURES, 0)),
		drying_time_h: nonzero(blocks.u16_le(TEMPERATURES, 2)),
		spool_width_mm: nonzero(blocks.u16_le(SPOOL_WIDTH, 4)).map(|w| f32::from(w) / 100.0),
		production_date: blocks
			.ascii(PRODUCTION_DATE, 0..16)
			.and_then(|s| NaiveDateTime::parse_from_str(&s, DATE_FORMAT).ok())
			.map(|dt| dt.date()),
		brand: None,
	};

	Some(Layout {
		material,
		variant,
		color,
		tray_uid,
		details,
	})
}

pub(crate) fn resolve(
	uid: Uid,
	layout: Layout,
	catalog: &CatalogSnapshot,
) -> Result<InterpretationResult, Refusal> {
	let material = require(catalog, Table::BambuMaterial, CatalogField::Material, &layout.material)?;
	let product = catalog
		.product_for(TagFormat::Bambu, &layout.material, &layout.variant)
		.ok_or_else(|| Refusal::miss(CatalogField::Product, format!("{}/{}", layout.material, layout.variant)))?;

	let series = layout.series().map(str::to_string);
	Ok(InterpretationResult::new(
		uid,
		TagFormat::Bambu,
		material,
		product,
		layout.color,
		layout.tray_uid,
		layout.details,
	)
	.with_series(series))
}

pub(crate) fn decode(
	uid: Uid,
	blocks: &BlockMap,
	catalog: &CatalogSnapshot,
) -> Result<InterpretationResult, Refusal> {
	let layout = read(blocks).ok_or(Refusal::Malformed)?;
	resolve(uid, layout, catalog)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("A00-K0", true)]
	#[case("B50-W1", true)]
	#[case("a00-K0", false)]
	#[case("A0-K0", false)]
	#[case("A00K0", false)]
	#[case("", false)]
	fn variant_id_shape(#[case] variant: &str, #[case] expected: bool) {
		assert_eq!(is_variant_id(variant), expected);
	}

	#[test]
	fn series_is_variant_prefix() {
		let layout = Layout {
			material: "GFA00".into(),
			variant: "A00-K0".into(),
			color: Rgba::new(0, 0, 0, 0xFF),
			tray_uid: String::new(),
			details: FilamentDetails::default(),
		};
		assert_eq!(layout.series(), Some("A00"));
	}
}
