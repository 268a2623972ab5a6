use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::ConvertError;

/// One worksheet as a grid of cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRows {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Read every sheet of an `.xlsx`/`.xls`/`.ods` workbook as cell text.
///
/// # Errors
///
/// Returns [`ConvertError::Workbook`] when the file cannot be opened and
/// [`ConvertError::Sheet`] when a listed sheet cannot be read.
pub fn read_workbook(path: &Path) -> Result<Vec<SheetRows>, ConvertError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| ConvertError::Workbook {
        path: path.display().to_string(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| ConvertError::Sheet {
                sheet: name.clone(),
                source,
            })?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        tracing::debug!(sheet = %name, rows = range.height(), "read worksheet");
        sheets.push(SheetRows { name, rows });
    }
    Ok(sheets)
}

/// Text of a cell as the sheet displays it. Whole floats lose the `.0`, so
/// numeric postal codes survive.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        other => other.to_string(),
    }
}
