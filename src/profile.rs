//! Column profiling for exported CSV tables.
//!
//! Each column is classified from its non-empty cells: all `true`/`false`
//! makes it [`ColumnKind::Boolean`], all parseable as `f64` makes it
//! [`ColumnKind::Numeric`], anything else is [`ColumnKind::Categorical`].

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::profile::{REPORT_SUFFIX, TABLE_EXTENSION, TITLE_PREFIX, TOP_VALUES};
use crate::errors::SynthError;
use crate::export::write_json;
use crate::types::ColumnName;
use crate::utils::ratio_or_zero;

/// Inferred type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Only `true`/`false` cells.
    Boolean,
    /// Only cells parsing as numbers.
    Numeric,
    /// Anything else.
    Categorical,
}

/// Summary statistics of a numeric column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumericStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub p25: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub p75: f64,
    /// Largest value.
    pub max: f64,
    /// Cells equal to zero.
    pub zeros: usize,
}

/// Share of `true` among the non-empty cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BooleanStats {
    /// Share of `true` among present cells.
    pub true_share: f64,
}

/// One distinct value and how often it occurs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    /// Cell value.
    pub value: String,
    /// Occurrences.
    pub count: usize,
}

/// Statistics of a categorical column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalStats {
    /// Distinct present values.
    pub distinct: usize,
    /// Most frequent values, ties broken alphabetically.
    pub top: Vec<ValueCount>,
}

/// Kind-specific part of a column profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    /// Boolean column statistics.
    Boolean(BooleanStats),
    /// Numeric column statistics.
    Numeric(NumericStats),
    /// Categorical column statistics.
    Categorical(CategoricalStats),
}

impl ColumnStats {
    /// Kind the statistics were computed for.
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnStats::Boolean(_) => ColumnKind::Boolean,
            ColumnStats::Numeric(_) => ColumnKind::Numeric,
            ColumnStats::Categorical(_) => ColumnKind::Categorical,
        }
    }
}

/// Profile of one column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Column header.
    pub name: ColumnName,
    /// Non-empty cells.
    pub count: usize,
    /// Empty cells.
    pub missing: usize,
    /// Kind-specific statistics.
    #[serde(flatten)]
    pub stats: ColumnStats,
}

/// Profile of a whole table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileReport {
    /// Report title.
    pub title: String,
    /// Data rows, header excluded.
    pub rows: usize,
    /// One entry per column, in header order.
    pub columns: Vec<ColumnProfile>,
}

impl ProfileReport {
    /// Look up a column profile by header name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Classify a column from its non-empty cells.
pub fn infer_kind<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut boolean = true;
    let mut numeric = true;
    let mut seen = false;
    for cell in cells.into_iter().filter(|cell| !cell.is_empty()) {
        seen = true;
        boolean &= matches!(cell, "true" | "false");
        numeric &= cell.parse::<f64>().is_ok();
        if !boolean && !numeric {
            break;
        }
    }
    match (seen, boolean, numeric) {
        (true, true, _) => ColumnKind::Boolean,
        (true, false, true) => ColumnKind::Numeric,
        _ => ColumnKind::Categorical,
    }
}

/// Linear-interpolated quantile of an ascending slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn numeric_stats(cells: &[&str]) -> Option<NumericStats> {
    let mut values: Vec<f64> = cells
        .iter()
        .filter_map(|cell| cell.parse::<f64>().ok())
        .collect();
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = ratio_or_zero(values.iter().sum(), n as f64);
    let std = (n > 1).then(|| {
        let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (n - 1) as f64).sqrt()
    });
    Some(NumericStats {
        mean,
        std,
        min: *values.first()?,
        p25: quantile(&values, 0.25)?,
        median: quantile(&values, 0.5)?,
        p75: quantile(&values, 0.75)?,
        max: *values.last()?,
        zeros: values.iter().filter(|value| **value == 0.0).count(),
    })
}

fn categorical_stats(cells: &[&str]) -> CategoricalStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &cell in cells {
        *counts.entry(cell).or_default() += 1;
    }
    let distinct = counts.len();
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    CategoricalStats {
        distinct,
        top: ranked
            .into_iter()
            .take(TOP_VALUES)
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect(),
    }
}

/// Profile one column given all of its cells, empty ones included.
pub fn profile_column(name: &str, cells: &[&str]) -> ColumnProfile {
    let present: Vec<&str> = cells.iter().copied().filter(|cell| !cell.is_empty()).collect();
    let kind = infer_kind(present.iter().copied());
    let stats = match kind {
        ColumnKind::Boolean => ColumnStats::Boolean(BooleanStats {
            true_share: ratio_or_zero(
                present.iter().filter(|cell| **cell == "true").count() as f64,
                present.len() as f64,
            ),
        }),
        ColumnKind::Numeric => match numeric_stats(&present) {
            Some(stats) => ColumnStats::Numeric(stats),
            None => ColumnStats::Categorical(categorical_stats(&present)),
        },
        ColumnKind::Categorical => ColumnStats::Categorical(categorical_stats(&present)),
    };
    ColumnProfile {
        name: name.to_string(),
        count: present.len(),
        missing: cells.len() - present.len(),
        stats,
    }
}

/// Read a headed CSV table and profile every column.
///
/// A file with no header row yields an empty report rather than an error.
pub fn profile_csv(path: &Path, title: &str) -> Result<ProfileReport, SynthError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(cell.to_string());
        }
        rows += 1;
    }
    let columns = headers
        .iter()
        .zip(&columns)
        .map(|(name, cells)| {
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            profile_column(name, &cells)
        })
        .collect::<Vec<_>>();
    debug!(path = %path.display(), rows, columns = columns.len(), "table profiled");
    Ok(ProfileReport {
        title: title.to_string(),
        rows,
        columns,
    })
}

/// Report title for a table file stem, e.g. `staff_data` -> `... Staff Data Profiling`.
pub fn report_title(stem: &str) -> String {
    let words: Vec<String> = stem
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    format!("{TITLE_PREFIX} - {} Profiling", words.join(" "))
}

/// Profile every CSV table directly under `input_dir` into `report_dir`.
///
/// Returns the report paths in file-name order. A missing or unreadable
/// `input_dir` is an error, not an empty run.
pub fn profile_directory(
    input_dir: &Path,
    report_dir: &Path,
) -> Result<Vec<PathBuf>, SynthError> {
    if !input_dir.is_dir() {
        return Err(SynthError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", input_dir.display()),
        )));
    }

    let mut tables = Vec::new();
    for entry in WalkDir::new(input_dir).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let is_table = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|extension| extension == TABLE_EXTENSION);
        if is_table {
            tables.push(entry.into_path());
        }
    }
    tables.sort();

    fs::create_dir_all(report_dir)?;
    let mut reports = Vec::with_capacity(tables.len());
    for table in &tables {
        let stem = table
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report = profile_csv(table, &report_title(&stem))?;
        let path = report_dir.join(format!("{stem}{REPORT_SUFFIX}"));
        write_json(&path, &report)?;
        info!(
            table = %table.display(),
            report = %path.display(),
            rows = report.rows,
            "profile report written"
        );
        reports.push(path);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn kind_inference_ignores_empty_cells() {
        assert_eq!(infer_kind(["true", "", "false"]), ColumnKind::Boolean);
        assert_eq!(infer_kind(["1.5", "", "-2"]), ColumnKind::Numeric);
        assert_eq!(infer_kind(["1.5", "Fish"]), ColumnKind::Categorical);
        assert_eq!(infer_kind(["", ""]), ColumnKind::Categorical);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn numeric_column_statistics() {
        let profile = profile_column("volume", &["2", "4", "", "4", "0", "5"]);
        assert_eq!(profile.count, 5);
        assert_eq!(profile.missing, 1);
        let ColumnStats::Numeric(stats) = profile.stats else {
            panic!("expected numeric stats");
        };
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.zeros, 1);
        let std = stats.std.unwrap();
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_sample_std() {
        let profile = profile_column("guests", &["12"]);
        let ColumnStats::Numeric(stats) = profile.stats else {
            panic!("expected numeric stats");
        };
        assert_eq!(stats.std, None);
        assert_eq!(stats.p25, 12.0);
    }

    #[test]
    fn categorical_top_values_rank_by_count_then_value() {
        let cells = ["Fish", "Dairy", "Fish", "F&V", "Dairy", "Beer"];
        let profile = profile_column("category", &cells);
        let ColumnStats::Categorical(stats) = profile.stats else {
            panic!("expected categorical stats");
        };
        assert_eq!(stats.distinct, 4);
        let top: Vec<(&str, usize)> = stats
            .top
            .iter()
            .map(|entry| (entry.value.as_str(), entry.count))
            .collect();
        assert_eq!(top, vec![("Dairy", 2), ("Fish", 2), ("Beer", 1), ("F&V", 1)]);
    }

    #[test]
    fn boolean_share_counts_present_cells_only() {
        let profile = profile_column("organic", &["true", "true", "false", ""]);
        assert_eq!(profile.stats.kind(), ColumnKind::Boolean);
        let ColumnStats::Boolean(stats) = profile.stats else {
            panic!("expected boolean stats");
        };
        assert!((stats.true_share - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_file_profiles_to_zero_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let report = profile_csv(&path, "Empty").unwrap();
        assert_eq!(report.rows, 0);
        assert!(report.columns.is_empty());
    }

    #[test]
    fn directory_profiling_writes_one_report_per_table() {
        let input = tempdir().unwrap();
        let reports = tempdir().unwrap();
        fs::write(
            input.path().join("staff_data.csv"),
            "employee_id,age,mentor_assigned\nE001,30,true\nE002,41,false\n",
        )
        .unwrap();
        fs::write(input.path().join("notes.txt"), "ignored").unwrap();

        let written = profile_directory(input.path(), reports.path()).unwrap();
        assert_eq!(written, vec![reports.path().join("staff_data_profile.json")]);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json["title"], "Loca Gruppen - Staff Data Profiling");
        assert_eq!(json["rows"], 2);
        assert_eq!(json["columns"][1]["kind"], "numeric");
        assert_eq!(json["columns"][2]["kind"], "boolean");
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let root = tempdir().unwrap();
        let reports = root.path().join("reports");
        let err = profile_directory(&root.path().join("does_not_exist"), &reports).unwrap_err();
        assert!(matches!(
            err,
            SynthError::Io(ref source) if source.kind() == io::ErrorKind::NotFound
        ));
        assert!(!reports.exists());
    }
}
