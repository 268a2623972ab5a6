//! Offline spreadsheet-to-catalog converter.
//!
//! Reads every sheet of a workbook, maps rows to normalized records,
//! deduplicates them, sorts by legal name, and writes the JSON catalog plus
//! a plain-text list of legal names.

pub mod dedup;
pub mod error;
pub mod output;
pub mod sheet;
pub mod workbook;

use std::path::Path;

use storedir_core::Store;

pub use dedup::{dedup, dedup_key, sort_by_legal_name, unique_legal_names};
pub use error::ConvertError;
pub use output::{to_json, to_name_list, write_outputs, OutputPaths};
pub use sheet::{find_header_row, records_from_rows};
pub use workbook::{read_workbook, SheetRows};

/// Map, deduplicate, and sort the rows of every sheet.
#[must_use]
pub fn convert_sheets(sheets: &[SheetRows]) -> Vec<Store> {
    let mapped: Vec<Store> = sheets
        .iter()
        .flat_map(|sheet| {
            let records = records_from_rows(&sheet.rows);
            tracing::debug!(sheet = %sheet.name, records = records.len(), "mapped sheet");
            records
        })
        .collect();

    let mapped_count = mapped.len();
    let mut unique = dedup(mapped);
    sort_by_legal_name(&mut unique);
    tracing::info!(
        mapped = mapped_count,
        unique = unique.len(),
        "converted workbook rows"
    );
    unique
}

/// Read and convert a workbook file.
///
/// # Errors
///
/// See [`read_workbook`].
pub fn convert_workbook(path: &Path) -> Result<Vec<Store>, ConvertError> {
    let sheets = read_workbook(path)?;
    Ok(convert_sheets(&sheets))
}
