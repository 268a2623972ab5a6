//! CSV export of the records currently on screen.
//!
//! Output starts with a UTF-8 byte-order mark so spreadsheet applications
//! detect the encoding, and every field is double-quoted.

use std::io::{self, Write};

use crate::store::Store;

const BOM: &str = "\u{feff}";

pub const CSV_HEADERS: [&str; 8] = [
    "Legal Name",
    "Brand/Store",
    "Address",
    "Neighborhood",
    "Municipality",
    "Region",
    "Postal Code",
    "Tax Id",
];

fn write_row<W: Write>(w: &mut W, cells: &[&str]) -> io::Result<()> {
    let line = cells
        .iter()
        .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(w, "{line}")
}

/// Write the BOM, the header row, and one row per store.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_csv<'a, W, I>(mut w: W, stores: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Store>,
{
    w.write_all(BOM.as_bytes())?;
    write_row(&mut w, &CSV_HEADERS)?;
    for s in stores {
        write_row(
            &mut w,
            &[
                s.legal_name.as_str(),
                s.display_name(),
                s.address_line.as_str(),
                s.neighborhood.as_str(),
                s.municipality.as_str(),
                s.region.as_str(),
                s.postal_code.as_str(),
                s.tax_id.as_str(),
            ],
        )?;
    }
    w.flush()
}

/// Render [`write_csv`] output into a `String`.
#[must_use]
pub fn to_csv_string<'a, I>(stores: I) -> String
where
    I: IntoIterator<Item = &'a Store>,
{
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(&mut buf, stores);
    String::from_utf8_lossy(&buf).into_owned()
}
