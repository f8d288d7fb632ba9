use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spool_catalog::{CatalogEntry, ProductEntry};
use spool_primitives::{Rgba, TagFormat, Uid};

/// Fully resolved description of the spool a tag belongs to.
///
/// Every catalog-derived field here came from an exact lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
	pub uid: Uid,
	pub format: TagFormat,
	pub sku: String,
	pub product_name: String,
	pub material: CatalogEntry,
	/// Format-specific variant code the product was resolved by.
	pub variant: String,
	/// Product series, where the layout carries one (Bambu `A00` of `A00-K0`).
	pub series: Option<String>,
	pub color: Rgba,
	pub color_name: String,
	/// Identifier of the physical unit: tray UID, serial, or tag UID depending on the
	/// format.
	pub unit_id: String,
	pub details: FilamentDetails,
}

impl InterpretationResult {
	pub(crate) fn new(
		uid: Uid,
		format: TagFormat,
		material: &CatalogEntry,
		product: &ProductEntry,
		color: Rgba,
		unit_id: String,
		details: FilamentDetails,
	) -> Self {
		Self {
			uid,
			format,
			sku: product.sku.clone(),
			product_name: product.name.clone(),
			material: material.clone(),
			variant: product.key.variant.clone(),
			series: None,
			color,
			color_name: product.color_name.clone(),
			unit_id,
			details,
		}
	}

	pub(crate) fn with_series(mut self, series: Option<String>) -> Self {
		self.series = series;
		self
	}
}

/// Print parameters a layout may carry. Absent or zero fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilamentDetails {
	pub filament_type: Option<String>,
	pub detailed_type: Option<String>,
	pub secondary_color: Option<Rgba>,
	pub weight_g: Option<u32>,
	pub diameter_mm: Option<f32>,
	pub length_m: Option<u32>,
	pub nozzle_diameter_mm: Option<f32>,
	pub hotend_min_c: Option<u16>,
	pub hotend_max_c: Option<u16>,
	/// Recommended bed temperature; the upper bound where the layout gives a range.
	pub bed_temp_c: Option<u16>,
	pub drying_temp_c: Option<u16>,
	pub drying_time_h: Option<u16>,
	pub spool_width_mm: Option<f32>,
	pub production_date: Option<NaiveDate>,
	/// Brand or vendor display name from the catalog.
	pub brand: Option<String>,
}

pub(crate) fn nonzero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
	value.filter(|v| *v != T::default())
}

pub(crate) fn positive(value: Option<f32>) -> Option<f32> {
	value.filter(|v| v.is_finite() && *v > 0.0)
}
