use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::export::{
    OPERATIONS_FILE, PROCUREMENT_LINES_FILE, PRODUCTS_CATALOG_FILE, STAFF_FILE, SUPPLIERS_FILE,
    TUNING_REPORT_FILE,
};
use crate::errors::SynthError;
use crate::pipeline::Dataset;

/// One file written by [`export_dataset`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    /// Written file.
    pub path: PathBuf,
    /// Data rows written; `0` for JSON reports.
    pub rows: usize,
}

/// Serialize `rows` as a headed CSV table at `path`.
///
/// Headers come from the row type's field names. Booleans are written as
/// `true`/`false`, absent optional values as empty cells, and dates as
/// `YYYY-MM-DD`.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, SynthError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SynthError> {
    let payload = serde_json::to_string_pretty(value)?;
    fs::write(path, payload)?;
    Ok(())
}

fn export_table<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
) -> Result<ExportedFile, SynthError> {
    let path = dir.join(name);
    let rows = write_csv(&path, rows)?;
    info!(path = %path.display(), rows, "table exported");
    Ok(ExportedFile { path, rows })
}

/// Write every table of `dataset` into `dir`, creating it when missing.
///
/// The tuning report is written next to the tables when tuning ran.
pub fn export_dataset(dataset: &Dataset, dir: &Path) -> Result<Vec<ExportedFile>, SynthError> {
    fs::create_dir_all(dir)?;
    let mut written = vec![
        export_table(dir, PROCUREMENT_LINES_FILE, &dataset.procurement)?,
        export_table(dir, PRODUCTS_CATALOG_FILE, &dataset.products)?,
        export_table(dir, SUPPLIERS_FILE, &dataset.suppliers)?,
        export_table(dir, OPERATIONS_FILE, &dataset.operations)?,
        export_table(dir, STAFF_FILE, &dataset.staff)?,
    ];

    if let Some(report) = &dataset.tuning {
        let path = dir.join(TUNING_REPORT_FILE);
        write_json(&path, report)?;
        info!(path = %path.display(), "tuning report exported");
        written.push(ExportedFile { path, rows: 0 });
    }
    Ok(written)
}
