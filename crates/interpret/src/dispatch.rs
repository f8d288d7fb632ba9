use spool_catalog::CatalogSnapshot;
use spool_primitives::{BlockMap, DecryptedScan, TagFormat};

use crate::formats::{bambu, creality, tigertag};
use crate::outcome::{Interpretation, Refusal};
use crate::result::InterpretationResult;

fn signature_matches(format: TagFormat, blocks: &BlockMap) -> bool {
	match format {
		TagFormat::Bambu => bambu::matches(blocks),
		TagFormat::TigerTag => tigertag::matches(blocks),
		TagFormat::Creality => creality::matches(blocks),
		TagFormat::Unrecognized => false,
	}
}

/// First format in [`TagFormat::KNOWN`] order whose signature matches `blocks`.
pub fn detect(blocks: &BlockMap) -> TagFormat {
	TagFormat::KNOWN
		.into_iter()
		.find(|&format| signature_matches(format, blocks))
		.unwrap_or(TagFormat::Unrecognized)
}

/// Runs the full pass and reports where it stopped.
pub fn evaluate(scan: &DecryptedScan, catalog: &CatalogSnapshot) -> Interpretation {
	if !scan.is_success() {
		return Interpretation::NotDecoded(scan.result());
	}

	let uid = scan.uid();
	let blocks = scan.blocks();
	let format = detect(blocks);
	let decoded = match format {
		TagFormat::Bambu => bambu::decode(uid, blocks, catalog),
		TagFormat::TigerTag => tigertag::decode(uid, blocks, catalog),
		TagFormat::Creality => creality::decode(uid, blocks, catalog),
		TagFormat::Unrecognized => {
			tracing::debug!(%uid, blocks = blocks.len(), "no format signature matched");
			return Interpretation::UnrecognizedFormat;
		}
	};

	match decoded {
		Ok(result) => {
			tracing::debug!(%uid, %format, sku = %result.sku, "interpreted");
			Interpretation::Resolved(result)
		}
		Err(Refusal::Malformed) => {
			tracing::debug!(%uid, %format, "layout incomplete");
			Interpretation::Malformed(format)
		}
		Err(Refusal::Miss { field, code }) => {
			tracing::debug!(%uid, %format, %field, code = %code, "catalog miss");
			Interpretation::CatalogMiss { format, field, code }
		}
	}
}

/// Interprets `scan`, returning a result only when every required field resolved.
pub fn interpret(scan: &DecryptedScan, catalog: &CatalogSnapshot) -> Option<InterpretationResult> {
	evaluate(scan, catalog).into_result()
}
