//! Spreadsheet conversion command handler.

use std::path::Path;

/// Output stem used when neither `--name` nor the input file provides one.
const DEFAULT_STEM: &str = "comercios";

/// Pick the output stem: explicit name first, then the input file stem.
pub(crate) fn output_stem(input: &Path, name: Option<&str>) -> String {
    name.map(str::to_owned)
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_owned())
}

/// Convert `input` and write `<stem>.json` and `<stem>.txt` into `out_dir`.
///
/// # Errors
///
/// Returns an error if the workbook is missing or unreadable, or the outputs
/// cannot be written.
pub(crate) fn run_convert(input: &Path, out_dir: &Path, name: Option<&str>) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("workbook not found: {}", input.display());
    }

    tracing::info!(input = %input.display(), "converting workbook");
    let records = storedir_convert::convert_workbook(input)?;
    let stem = output_stem(input, name);
    let paths = storedir_convert::write_outputs(out_dir, &stem, &records)?;
    let names = storedir_convert::unique_legal_names(&records).len();

    println!("{} ({} unique records)", paths.json.display(), records.len());
    println!("{} ({names} unique names)", paths.txt.display());
    Ok(())
}
