//! Creality layout: 48 ASCII characters spread over blocks 4 to 6.
//!
//! | Chars | Field |
//! |-------|-------|
//! | `0..5` | production date `YYMDD`, month as one hex digit |
//! | `5..9` | vendor id |
//! | `9..11` | batch |
//! | `11..17` | material id |
//! | `17..24` | colour `0RRGGBB` |
//! | `24..28` | length m, decimal |
//! | `28..34` | serial |
//! | `34..48` | reserved |

use std::ops::Range;

use chrono::NaiveDate;
use spool_catalog::{CatalogSnapshot, Table};
use spool_primitives::{BlockMap, Rgba, TagFormat, Uid};

use crate::outcome::{CatalogField, Refusal, require};
use crate::result::{FilamentDetails, InterpretationResult};

const BLOCKS: Range<usize> = 4..7;
const PAYLOAD_LEN: usize = 48;

const DATE: Range<usize> = 0..5;
const VENDOR: Range<usize> = 5..9;
const MATERIAL: Range<usize> = 11..17;
const COLOR: Range<usize> = 17..24;
const LENGTH: Range<usize> = 24..28;
const SERIAL: Range<usize> = 28..34;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
	pub vendor: String,
	pub material: String,
	/// Raw colour field; doubles as the product variant.
	pub color_code: String,
	pub color: Rgba,
	pub serial: String,
	pub details: FilamentDetails,
}

fn payload(blocks: &BlockMap) -> Option<String> {
	blocks
		.ascii_span(BLOCKS)
		.filter(|s| s.len() == PAYLOAD_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric()))
}

fn production_date(field: &str) -> Option<NaiveDate> {
	let year = 2000 + field.get(0..2)?.parse::<i32>().ok()?;
	let month = u32::from_str_radix(field.get(2..3)?, 16).ok()?;
	let day = field.get(3..5)?.parse::<u32>().ok()?;
	NaiveDate::from_ymd_opt(year, month, day)
}

fn color(field: &str) -> Option<Rgba> {
	field.strip_prefix('0').and_then(Rgba::from_hex)
}

pub(crate) fn matches(blocks: &BlockMap) -> bool {
	payload(blocks).is_some()
}

pub(crate) fn read(blocks: &BlockMap) -> Option<Layout> {
	let text = payload(blocks)?;
	let color_code = text[COLOR].to_string();

	Some(Layout {
		vendor: text[VENDOR].to_string(),
		material: text[MATERIAL].to_string(),
		color: color(&color_code)?,
		color_code,
		serial: text[SERIAL].to_string(),
		details: FilamentDetails {
			length_m: text[LENGTH].parse::<u32>().ok().filter(|&m| m != 0),
			production_date: production_date(&text[DATE]),
			..FilamentDetails::default()
		},
	})
}

pub(crate) fn resolve(
	uid: Uid,
	layout: Layout,
	catalog: &CatalogSnapshot,
) -> Result<InterpretationResult, Refusal> {
	let vendor = require(catalog, Table::CrealityVendor, CatalogField::Vendor, &layout.vendor)?;
	let material = require(catalog, Table::CrealityMaterial, CatalogField::Material, &layout.material)?;
	let product = catalog
		.product_for(TagFormat::Creality, &layout.material, &layout.color_code)
		.ok_or_else(|| Refusal::miss(CatalogField::Product, format!("{}/{}", layout.material, layout.color_code)))?;

	let mut details = layout.details;
	details.filament_type = Some(material.name.clone());
	details.brand = Some(vendor.name.clone());

	Ok(InterpretationResult::new(
		uid,
		TagFormat::Creality,
		material,
		product,
		layout.color,
		layout.serial,
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
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("24315", NaiveDate::from_ymd_opt(2024, 3, 15))]
	#[case("25C01", NaiveDate::from_ymd_opt(2025, 12, 1))]
	#[case("24D01", None)]
	#[case("24230", None)]
	#[case("2A101", None)]
	fn date_field(#[case] field: &str, #[case] expected: Option<NaiveDate>) {
		assert_eq!(production_date(field), expected);
	}

	#[test]
	fn color_field_drops_leading_zero() {
		assert_eq!(color("0FF8000"), Some(Rgba::new(0xFF, 0x80, 0x00, 0xFF)));
		assert_eq!(color("1FF8000"), None);
	}
}
