use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storedir_core::Store;

use crate::dedup::unique_legal_names;
use crate::error::ConvertError;

/// Record layout of the generated JSON file. Converted rows never carry a
/// tax id, which is written as `null`.
#[derive(Serialize)]
struct OutputRecord<'a> {
    razon_social: &'a str,
    marca_tienda: &'a str,
    tienda_ubicacion: &'a str,
    rfc: Option<&'a str>,
    ubicacion: &'a str,
    colonia: &'a str,
    municipio: &'a str,
    estado: &'a str,
    cp: &'a str,
}

impl<'a> From<&'a Store> for OutputRecord<'a> {
    fn from(store: &'a Store) -> Self {
        Self {
            razon_social: &store.legal_name,
            marca_tienda: &store.brand_name,
            tienda_ubicacion: &store.location_label,
            rfc: Some(store.tax_id.as_str()).filter(|t| !t.is_empty()),
            ubicacion: &store.address_line,
            colonia: &store.neighborhood,
            municipio: &store.municipality,
            estado: &store.region,
            cp: &store.postal_code,
        }
    }
}

/// Paths of the files produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub txt: PathBuf,
}

/// Pretty-printed JSON array of records.
///
/// # Errors
///
/// Returns [`ConvertError::Json`] if serialization fails.
pub fn to_json(records: &[Store]) -> Result<String, ConvertError> {
    let out: Vec<OutputRecord<'_>> = records.iter().map(OutputRecord::from).collect();
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Unique legal names, one per line, with a trailing newline.
#[must_use]
pub fn to_name_list(records: &[Store]) -> String {
    let mut text = unique_legal_names(records).join("\n");
    text.push('\n');
    text
}

/// Write `<stem>.json` and `<stem>.txt` into `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] when the directory or a file cannot be
/// written, or [`ConvertError::Json`] if serialization fails.
pub fn write_outputs(
    out_dir: &Path,
    stem: &str,
    records: &[Store],
) -> Result<OutputPaths, ConvertError> {
    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source| ConvertError::Io { path, source }
    };

    fs::create_dir_all(out_dir).map_err(io_err(out_dir))?;

    let json = out_dir.join(format!("{stem}.json"));
    fs::write(&json, to_json(records)?).map_err(io_err(&json))?;

    let txt = out_dir.join(format!("{stem}.txt"));
    fs::write(&txt, to_name_list(records)).map_err(io_err(&txt))?;

    Ok(OutputPaths { json, txt })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str) -> Store {
        Store {
            legal_name: name.to_string(),
            brand_name: name.to_string(),
            location_label: name.to_string(),
            postal_code: "01000".to_string(),
            ..Store::default()
        }
    }

    #[test]
    fn json_uses_record_field_names_and_null_tax_id() {
        let json = to_json(&[rec("LUPITA")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["razon_social"], "LUPITA");
        assert_eq!(first["cp"], "01000");
        assert!(first["rfc"].is_null());
        assert!(first.get("id").is_none());
    }

    #[test]
    fn json_round_trips_into_store() {
        let json = to_json(&[rec("LUPITA")]).unwrap();
        let back: Vec<Store> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![rec("LUPITA")]);
    }

    #[test]
    fn name_list_has_trailing_newline() {
        assert_eq!(to_name_list(&[rec("A"), rec("B"), rec("A")]), "A\nB\n");
        assert_eq!(to_name_list(&[]), "\n");
    }

    #[test]
    fn write_outputs_creates_directory_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let paths = write_outputs(&out_dir, "padron", &[rec("A")]).unwrap();

        assert_eq!(paths.json, out_dir.join("padron.json"));
        assert_eq!(fs::read_to_string(&paths.txt).unwrap(), "A\n");
        let json = fs::read_to_string(&paths.json).unwrap();
        assert!(json.starts_with("[\n"));
    }
}
