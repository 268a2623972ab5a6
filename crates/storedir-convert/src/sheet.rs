//! Header detection and column mapping for one sheet of cell text.
//!
//! A sheet is a grid of already-stringified cells. The header row is located
//! by its tokens, header cells are normalized, and each data row is mapped
//! to a [`Store`] through a fixed alias table.

use std::collections::HashMap;

use storedir_core::{normalize_postal_code, normalize_text, Store};

const NAME_ALIASES: &[&str] = &["NOMBRE DEL ESTABLECIMIENTO", "NOMBRE"];
const ADDRESS_ALIASES: &[&str] = &["DOMICILIO OPERATIVO", "DOMICILIO"];
const NEIGHBORHOOD_ALIASES: &[&str] = &["COL.", "COL"];
const POSTAL_CODE_ALIASES: &[&str] = &["CP", "C.P"];
const MUNICIPALITY_ALIASES: &[&str] = &["MUNICIPIO"];
const REGION_ALIASES: &[&str] = &["ESTADO"];

/// Index of the first row that looks like a header, or 0 when none does.
///
/// A header row mentions a name column, an address column, and a postal
/// code column somewhere in its uppercased text.
#[must_use]
pub fn find_header_row(rows: &[Vec<String>]) -> usize {
    locate_header_row(rows).unwrap_or(0)
}

fn locate_header_row(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter().position(|row| {
        let text = row
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.to_uppercase())
            .collect::<Vec<_>>()
            .join(" ");
        text.contains("NOMBRE")
            && text.contains("DOMICILIO")
            && (text.contains("CP") || text.contains("C.P"))
    })
}

/// Normalized header text to column index. A repeated header maps to its
/// rightmost column.
fn column_index(header: &[String]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| (normalize_text(cell), i))
        .collect()
}

struct RowView<'a> {
    columns: &'a HashMap<String, usize>,
    row: &'a [String],
}

impl RowView<'_> {
    /// Raw value of the first alias whose cell is non-empty.
    fn first_of(&self, aliases: &[&str]) -> &str {
        aliases
            .iter()
            .filter_map(|alias| self.columns.get(*alias))
            .filter_map(|&i| self.row.get(i))
            .map(String::as_str)
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}

/// Map every data row below the header to a normalized record.
///
/// Rows whose six mapped columns are all empty are skipped.
#[must_use]
pub fn records_from_rows(rows: &[Vec<String>]) -> Vec<Store> {
    let header_row = locate_header_row(rows).unwrap_or_else(|| {
        if !rows.is_empty() {
            tracing::warn!("no header row found, using the first row");
        }
        0
    });
    let Some(header) = rows.get(header_row) else {
        return Vec::new();
    };
    let columns = column_index(header);

    rows.iter()
        .skip(header_row + 1)
        .filter_map(|row| {
            let view = RowView {
                columns: &columns,
                row,
            };
            let name = view.first_of(NAME_ALIASES);
            let address = view.first_of(ADDRESS_ALIASES);
            let neighborhood = view.first_of(NEIGHBORHOOD_ALIASES);
            let postal_code = view.first_of(POSTAL_CODE_ALIASES);
            let municipality = view.first_of(MUNICIPALITY_ALIASES);
            let region = view.first_of(REGION_ALIASES);

            if [name, address, neighborhood, postal_code, municipality, region]
                .iter()
                .all(|v| v.is_empty())
            {
                return None;
            }

            let name = normalize_text(name);
            Some(Store {
                id: None,
                legal_name: name.clone(),
                brand_name: name.clone(),
                location_label: name,
                address_line: normalize_text(address),
                neighborhood: normalize_text(neighborhood),
                municipality: normalize_text(municipality),
                region: normalize_text(region),
                postal_code: normalize_postal_code(postal_code),
                tax_id: String::new(),
                is_featured: false,
            })
        })
        .collect()
}
