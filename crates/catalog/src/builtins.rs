//! Seed tables compiled into the crate.
//!
//! These rows cover the common spools. A catalog file loaded through
//! [`crate::JsonFileCatalog`] replaces them wholesale.

use spool_primitives::TagFormat;

use crate::product::{ProductEntry, ProductKey};
use crate::table::Table;

pub(crate) const VERSION: u32 = 1;

/// `(code, name, description)`
type Row = (&'static str, &'static str, &'static str);

/// `(format, material, variant, sku, name, colour name)`
pub(crate) type ProductRow = (
	TagFormat,
	&'static str,
	&'static str,
	&'static str,
	&'static str,
	&'static str,
);

const BAMBU_MATERIALS: &[Row] = &[
	("GFA00", "PLA Basic", "General purpose PLA"),
	("GFA01", "PLA Matte", "Low-sheen PLA"),
	("GFA02", "PLA Metal", "PLA with metallic pigment"),
	("GFA05", "PLA Silk", "High-gloss silk PLA"),
	("GFA07", "PLA Marble", "Speckled stone-look PLA"),
	("GFA08", "PLA Sparkle", "Glitter PLA"),
	("GFA09", "PLA Tough", "Impact modified PLA"),
	("GFA50", "PLA-CF", "Carbon fibre reinforced PLA"),
	("GFB00", "ABS", ""),
	("GFB01", "ASA", "UV resistant"),
	("GFC00", "PC", "Polycarbonate"),
	("GFG00", "PETG Basic", ""),
	("GFG02", "PETG HF", "High flow PETG"),
	("GFG50", "PETG-CF", "Carbon fibre reinforced PETG"),
	("GFL99", "Generic PLA", ""),
	("GFN03", "PA-CF", "Carbon fibre reinforced nylon"),
	("GFS00", "Support W", "Breakaway support for PLA"),
	("GFS02", "Support for PLA", ""),
	("GFU01", "TPU 95A HF", "High flow TPU"),
];

const TIGER_MATERIALS: &[Row] = &[
	("38219", "PLA", ""),
	("46880", "PETG", ""),
	("37234", "ABS", ""),
	("62015", "ASA", ""),
	("18407", "TPU", "Shore 95A"),
	("52281", "PLA-CF", "Carbon fibre reinforced PLA"),
];

const TIGER_BRANDS: &[Row] = &[
	("1", "TigerTag", "Community reference spools"),
	("2", "Polymaker", ""),
	("3", "Prusament", ""),
	("4", "eSUN", ""),
];

const CREALITY_MATERIALS: &[Row] = &[
	("101001", "Hyper PLA", ""),
	("101002", "Hyper PLA-CF", ""),
	("102001", "Hyper PETG", ""),
	("103001", "Hyper ABS", ""),
	("104001", "CR-PLA", ""),
	("105001", "CR-TPU", "Shore 95A"),
];

const CREALITY_VENDORS: &[Row] = &[("0276", "Creality", "")];

pub(crate) const PRODUCTS: &[ProductRow] = &[
	(TagFormat::Bambu, "GFA00", "A00-K0", "10101", "PLA Basic Black", "Black"),
	(TagFormat::Bambu, "GFA00", "A00-W1", "10100", "PLA Basic Jade White", "Jade White"),
	(TagFormat::Bambu, "GFA00", "A00-R0", "10200", "PLA Basic Red", "Red"),
	(TagFormat::Bambu, "GFA00", "A00-B8", "10603", "PLA Basic Cyan", "Cyan"),
	(TagFormat::Bambu, "GFA00", "A00-D0", "10103", "PLA Basic Gray", "Gray"),
	(TagFormat::Bambu, "GFA01", "A01-K1", "11101", "PLA Matte Charcoal", "Charcoal"),
	(TagFormat::Bambu, "GFA01", "A01-W2", "11100", "PLA Matte Ivory White", "Ivory White"),
	(TagFormat::Bambu, "GFG00", "G00-K0", "33102", "PETG Basic Black", "Black"),
	(TagFormat::Bambu, "GFB01", "B01-W0", "45100", "ASA White", "White"),
	(TagFormat::TigerTag, "38219", "1001", "TT-PLA-1001", "TigerTag PLA Orange", "Orange"),
	(TagFormat::TigerTag, "46880", "2001", "TT-PETG-2001", "TigerTag PETG Clear", "Clear"),
	(TagFormat::Creality, "101001", "0FFFFFF", "3301010123", "Hyper PLA White", "White"),
	(TagFormat::Creality, "101001", "0000000", "3301010122", "Hyper PLA Black", "Black"),
	(TagFormat::Creality, "102001", "0000000", "3301030031", "Hyper PETG Black", "Black"),
];

pub(crate) fn table_rows(table: Table) -> &'static [Row] {
	match table {
		Table::BambuMaterial => BAMBU_MATERIALS,
		Table::TigerMaterial => TIGER_MATERIALS,
		Table::TigerBrand => TIGER_BRANDS,
		Table::CrealityMaterial => CREALITY_MATERIALS,
		Table::CrealityVendor => CREALITY_VENDORS,
	}
}

pub(crate) fn product_entry(row: &ProductRow) -> ProductEntry {
	let &(format, material, variant, sku, name, color_name) = row;
	ProductEntry {
		sku: sku.to_string(),
		key: ProductKey::new(format, material, variant),
		name: name.to_string(),
		color_name: color_name.to_string(),
	}
}
