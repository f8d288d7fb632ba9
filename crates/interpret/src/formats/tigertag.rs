//! TigerTag layout: open community format, binary big-endian fields in blocks 4 to 6.
//!
//! | Block | Bytes | Field |
//! |-------|-------|-------|
//! | 4 | `0..4` | magic [`MAGIC`] |
//! | 4 | `4..8`, `8..10` | product id, material id |
//! | 4 | `10`, `11`, `12`, `13` | aspect 1, aspect 2, type id, diameter id |
//! | 4 | `14..16` | brand id |
//! | 5 | `0..4`, `4..7`, `7` | RGBA, measure, measure unit |
//! | 5 | `8..10`, `10..12` | nozzle min, nozzle max |
//! | 5 | `12`, `13`, `14`, `15` | drying temp, drying hours, bed min, bed max |
//! | 6 | `0..4` | production time, seconds since 2000-01-01 UTC |
//!
//! Catalog codes are the decimal renderings of the numeric ids.

use chrono::{DateTime, NaiveDate};
use spool_catalog::{CatalogSnapshot, Table};
use spool_primitives::{BlockMap, Rgba, TagFormat, Uid};

use crate::outcome::{CatalogField, Refusal, require};
use crate::result::{FilamentDetails, InterpretationResult, nonzero};

pub(crate) const MAGIC: u32 = 0x7F54_4754;

const HEADER: usize = 4;
const PHYSICAL: usize = 5;
const PRODUCTION: usize = 6;

const UNIT_GRAMS: u8 = 1;
const UNIT_METERS: u8 = 2;

/// Seconds from the Unix epoch to 2000-01-01T00:00:00Z.
const EPOCH_2000: i64 = 946_684_800;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
	pub product_id: u32,
	pub material_id: u16,
	pub brand_id: u16,
	pub color: Rgba,
	pub details: FilamentDetails,
}

fn diameter(id: u8) -> Option<f32> {
	match id {
		0 => Some(1.75),
		1 => Some(2.85),
		_ => None,
	}
}

fn production_date(seconds: u32) -> Option<NaiveDate> {
	if seconds == 0 {
		return None;
	}
	DateTime::from_timestamp(EPOCH_2000 + i64::from(seconds), 0).map(|dt| dt.date_naive())
}

pub(crate) fn matches(blocks: &BlockMap) -> bool {
	blocks.u32_be(HEADER, 0) == Some(MAGIC)
}

pub(crate) fn read(blocks: &BlockMap) -> Option<Layout> {
	if !matches(blocks) {
		return None;
	}
	let product_id = blocks.u32_be(HEADER, 4)?;
	let material_id = blocks.u16_be(HEADER, 8)?;
	let brand_id = blocks.u16_be(HEADER, 14)?;
	let color = Rgba::from_bytes(blocks.array(PHYSICAL, 0)?);

	let measure = blocks.u24_be(PHYSICAL, 4).filter(|&m| m != 0);
	let unit = blocks.u8(PHYSICAL, 7);
	let (weight_g, length_m) = match unit {
		Some(UNIT_GRAMS) => (measure, None),
		Some(UNIT_METERS) => (None, measure),
		_ => (None, None),
	};

	let details = FilamentDetails {
		weight_g,
		length_m,
		diameter_mm: blocks.u8(HEADER, 13).and_then(diameter),
		hotend_min_c: nonzero(blocks.u16_be(PHYSICAL, 8)),
		hotend_max_c: nonzero(blocks.u16_be(PHYSICAL, 10)),
		drying_temp_c: nonzero(blocks.u8(PHYSICAL, 12)).map(u16::from),
		drying_time_h: nonzero(blocks.u8(PHYSICAL, 13)).map(u16::from),
		bed_temp_c: nonzero(blocks.u8(PHYSICAL, 15)).map(u16::from),
		production_date: blocks.u32_be(PRODUCTION, 0).and_then(production_date),
		..FilamentDetails::default()
	};

	Some(Layout {
		product_id,
		material_id,
		brand_id,
		color,
		details,
	})
}

pub(crate) fn resolve(
	uid: Uid,
	layout: Layout,
	catalog: &CatalogSnapshot,
) -> Result<InterpretationResult, Refusal> {
	let material_code = layout.material_id.to_string();
	let brand_code = layout.brand_id.to_string();
	let product_code = layout.product_id.to_string();

	let material = require(catalog, Table::TigerMaterial, CatalogField::Material, &material_code)?;
	let brand = require(catalog, Table::TigerBrand, CatalogField::Brand, &brand_code)?;
	let product = catalog
		.product_for(TagFormat::TigerTag, &material_code, &product_code)
		.ok_or_else(|| Refusal::miss(CatalogField::Product, format!("{material_code}/{product_code}")))?;

	let mut details = layout.details;
	details.filament_type = Some(material.name.clone());
	details.brand = Some(brand.name.clone());

	// The tag is the unit; TigerTag carries no separate serial.
	Ok(InterpretationResult::new(
		uid,
		TagFormat::TigerTag,
		material,
		product,
		layout.color,
		uid.to_hex(),
		details,
	))
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

	use super::*;

	#[test]
	fn production_date_counts_from_2000() {
		assert_eq!(production_date(0), None);
		assert_eq!(production_date(86_400), NaiveDate::from_ymd_opt(2000, 1, 2));
		// 2024-03-15T00:00:00Z
		assert_eq!(production_date(763_776_000), NaiveDate::from_ymd_opt(2024, 3, 15));
	}

	#[test]
	fn diameter_ids() {
		assert_eq!(diameter(0), Some(1.75));
		assert_eq!(diameter(1), Some(2.85));
		assert_eq!(diameter(7), None);
	}
}
